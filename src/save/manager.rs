//! Slot manager for handling save/load operations
//!
//! This module provides the SlotManager struct which handles:
//! - Numbered save slots under one directory
//! - Backup rotation on every overwrite
//! - Temp-then-rename writes so a crash never leaves half a file
//! - Falling back to the backup when the primary is unreadable
//! - Slot listing for the load menu

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::error::{SaveError, SlotRangeError};
use super::gate::SaveGate;
use super::migration;
use super::types::SaveData;
use crate::config::SaveConfig;

/// What happened to a save request
#[derive(Debug)]
pub enum SaveOutcome {
    /// Written to disk
    Saved,
    /// The gate refused; nothing on disk changed
    Deferred,
    /// Capture or I/O failed; the previous save (if any) is intact
    Failed(SaveError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

/// Which file a load actually came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Primary,
    /// The primary was unreadable; the backup was used and copied over it
    Backup,
}

/// Summary of one occupied slot for the load menu
#[derive(Debug, Clone, PartialEq)]
pub struct SlotInfo {
    pub slot: u32,
    pub saved_at: DateTime<Utc>,
    pub level: u32,
    pub zone: i32,
    pub playtime_seconds: f64,
    pub file_size: u64,
}

/// The handful of fields slot listing needs
///
/// Listing parses only this, not a whole [`SaveData`].
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct SlotHeader {
    saved_at: DateTime<Utc>,
    playtime_seconds: f64,
    stats: HeaderStats,
    progress: HeaderProgress,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct HeaderStats {
    level: u32,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct HeaderProgress {
    zone: i32,
}

pub struct SlotManager {
    save_directory: PathBuf,
    max_slots: u32,
}

impl SlotManager {
    /// Creates a new SlotManager for the configured save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(config: &SaveConfig) -> Result<Self, SaveError> {
        let save_dir = config.save_dir.clone();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
            tracing::info!(dir = %save_dir.display(), "created save directory");
        }

        Ok(SlotManager {
            save_directory: save_dir,
            max_slots: config.max_slots,
        })
    }

    pub fn save_directory(&self) -> &Path {
        &self.save_directory
    }

    pub fn max_slots(&self) -> u32 {
        self.max_slots
    }

    pub fn primary_path(&self, slot: u32) -> Result<PathBuf, SlotRangeError> {
        self.check_slot(slot)?;
        Ok(self.save_directory.join(format!("gamesave_slot{slot}.json")))
    }

    pub fn backup_path(&self, slot: u32) -> Result<PathBuf, SlotRangeError> {
        self.check_slot(slot)?;
        Ok(self.save_directory.join(format!("gamesave_slot{slot}_backup.json")))
    }

    fn temp_path(&self, slot: u32) -> Result<PathBuf, SlotRangeError> {
        self.check_slot(slot)?;
        Ok(self.save_directory.join(format!("gamesave_slot{slot}.json.tmp")))
    }

    fn check_slot(&self, slot: u32) -> Result<(), SlotRangeError> {
        if slot == 0 || slot > self.max_slots {
            return Err(SlotRangeError { slot, max: self.max_slots });
        }
        Ok(())
    }

    /// Check if a save file exists for a given slot
    pub fn has_save(&self, slot: u32) -> Result<bool, SlotRangeError> {
        Ok(self.primary_path(slot)?.exists())
    }

    /// Saves the game into a slot
    ///
    /// The gate is asked first; `capture` only runs if it agrees. The old
    /// primary becomes the backup before the new file lands. Errors are
    /// logged and reported in the outcome, never propagated.
    pub fn save(
        &self,
        slot: u32,
        gate: &dyn SaveGate,
        capture: impl FnOnce() -> SaveData,
    ) -> Result<SaveOutcome, SlotRangeError> {
        let primary = self.primary_path(slot)?;
        let backup = self.backup_path(slot)?;
        let temp = self.temp_path(slot)?;

        if !gate.is_safe_to_save() {
            tracing::info!(slot, "board is busy, save deferred");
            return Ok(SaveOutcome::Deferred);
        }

        let data = capture();
        match write_slot(&data, &primary, &backup, &temp) {
            Ok(bytes) => {
                tracing::info!(slot, bytes, path = %primary.display(), "game saved");
                Ok(SaveOutcome::Saved)
            }
            Err(err) => {
                tracing::error!(slot, error = %err, "save failed");
                let _ = fs::remove_file(&temp);
                Ok(SaveOutcome::Failed(err))
            }
        }
    }

    /// Loads a slot, falling back to its backup
    ///
    /// Returns None when the slot is empty or both files are unreadable.
    pub fn load(&self, slot: u32) -> Result<Option<SaveData>, SlotRangeError> {
        Ok(self.load_detailed(slot)?.map(|(data, _)| data))
    }

    /// Like [`SlotManager::load`], also reporting which file was used
    pub fn load_detailed(&self, slot: u32) -> Result<Option<(SaveData, LoadSource)>, SlotRangeError> {
        let primary = self.primary_path(slot)?;
        let backup = self.backup_path(slot)?;

        if !primary.exists() && !backup.exists() {
            tracing::debug!(slot, "no save in slot");
            return Ok(None);
        }

        let primary_err = match read_save(&primary) {
            Ok((data, _)) => return Ok(Some((data, LoadSource::Primary))),
            Err(err) => {
                tracing::warn!(slot, error = %err, "primary save unreadable, trying backup");
                err
            }
        };

        match read_save(&backup) {
            Ok((data, raw)) => {
                // A primary from a newer build is intact, just not for us
                if matches!(primary_err, SaveError::UnsupportedVersion { .. }) {
                    tracing::info!(slot, "keeping newer primary save, loaded backup");
                } else if let Err(err) = fs::write(&primary, raw) {
                    tracing::warn!(slot, error = %err, "could not restore primary from backup");
                } else {
                    tracing::info!(slot, "primary save restored from backup");
                }
                Ok(Some((data, LoadSource::Backup)))
            }
            Err(err) => {
                tracing::error!(slot, error = %err, "backup save unreadable, slot lost");
                Ok(None)
            }
        }
    }

    /// Removes a slot's primary, backup and any leftover temp file
    ///
    /// Deleting an empty slot is not an error.
    pub fn delete(&self, slot: u32) -> Result<(), SlotRangeError> {
        for path in [self.primary_path(slot)?, self.backup_path(slot)?, self.temp_path(slot)?] {
            match fs::remove_file(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "deleted"),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => tracing::warn!(path = %path.display(), error = %err, "delete failed"),
            }
        }
        Ok(())
    }

    /// Slots with a primary save, ascending
    pub fn used_slots(&self) -> Vec<u32> {
        (1..=self.max_slots)
            .filter(|&slot| self.has_save(slot).unwrap_or(false))
            .collect()
    }

    /// Header info for one slot, None if empty or unreadable
    ///
    /// Falls back to the backup's header when the primary can't be read,
    /// matching what [`SlotManager::load`] would return.
    pub fn slot_info(&self, slot: u32) -> Result<Option<SlotInfo>, SlotRangeError> {
        let primary = self.primary_path(slot)?;
        let backup = self.backup_path(slot)?;
        Ok(read_header(slot, &primary).or_else(|| read_header(slot, &backup)))
    }

    /// Header info for every occupied slot, ascending by slot
    pub fn all_slot_info(&self) -> Vec<SlotInfo> {
        (1..=self.max_slots)
            .filter_map(|slot| self.slot_info(slot).ok().flatten())
            .collect()
    }

    /// The slot with the latest `savedAt`
    ///
    /// Ties go to the lower slot number.
    pub fn most_recent_slot(&self) -> Option<u32> {
        self.all_slot_info()
            .into_iter()
            .fold(None::<SlotInfo>, |best, info| match best {
                Some(best) if best.saved_at >= info.saved_at => Some(best),
                _ => Some(info),
            })
            .map(|info| info.slot)
    }
}

/// Serializes and writes one save, returning the byte count
fn write_slot(data: &SaveData, primary: &Path, backup: &Path, temp: &Path) -> Result<usize, SaveError> {
    // Serialize to JSON (pretty format for readability/debugging)
    let json = serde_json::to_string_pretty(data)?;

    if primary.exists() {
        fs::copy(primary, backup)?;
    }

    let mut file = fs::File::create(temp)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp, primary)?;
    Ok(json.len())
}

/// Parses just the header fields of a save file
fn read_header(slot: u32, path: &Path) -> Option<SlotInfo> {
    let text = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<SlotHeader>(&text) {
        Ok(header) => Some(SlotInfo {
            slot,
            saved_at: header.saved_at,
            level: header.stats.level,
            zone: header.progress.zone,
            playtime_seconds: header.playtime_seconds,
            file_size: text.len() as u64,
        }),
        Err(err) => {
            tracing::warn!(slot, path = %path.display(), error = %err, "unreadable save header");
            None
        }
    }
}

/// Reads, upgrades and parses a save file, also returning the raw text
fn read_save(path: &Path) -> Result<(SaveData, String), SaveError> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    let value = migration::upgrade(value)?;
    let data = serde_json::from_value(value)?;
    Ok((data, raw))
}
