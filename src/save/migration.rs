//! Save format migration
//!
//! Older save files are upgraded step by step on their way in. Each step
//! takes the raw JSON tree of one version and rewrites it into the next, so
//! the typed [`SaveData`](super::types::SaveData) only ever has to know the
//! current shape.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::error::SaveError;
use super::types::CURRENT_SAVE_VERSION;

/// Version assumed for files written before `saveVersion` existed
pub const LEGACY_SAVE_VERSION: &str = "1.0";

/// Errors that can occur during migration.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("no migration path from version {from} to version {to}")]
    NoMigrationPath { from: String, to: String },
    #[error("migration from version {from} to version {to} failed: {reason}")]
    MigrationFailed { from: String, to: String, reason: String },
}

/// A function that rewrites a save tree in place
pub type MigrationFn = fn(&mut Value) -> Result<(), String>;

struct MigrationStep {
    to: &'static str,
    migrate: MigrationFn,
}

/// Registry of migration steps keyed by source version
pub struct MigrationRegistry {
    steps: BTreeMap<&'static str, MigrationStep>,
}

impl MigrationRegistry {
    /// Create an empty migration registry.
    pub fn new() -> Self {
        Self { steps: BTreeMap::new() }
    }

    /// Every step this build knows about
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("1.0", "1.1", migrate_1_0_to_1_1);
        registry
    }

    pub fn register(&mut self, from: &'static str, to: &'static str, migrate: MigrationFn) {
        self.steps.insert(from, MigrationStep { to, migrate });
    }

    /// Check whether a complete migration path exists from `from` to `to`.
    pub fn can_migrate(&self, from: &str, to: &str) -> bool {
        let mut current = from;
        while current != to {
            match self.steps.get(current) {
                Some(step) => current = step.to,
                None => return false,
            }
        }
        true
    }

    /// Migrates a save tree from `from` to `to`
    ///
    /// Chains registered steps and stamps each intermediate version into
    /// `saveVersion`. The tree is returned unchanged when `from == to`.
    pub fn migrate(&self, mut data: Value, from: &str, to: &str) -> Result<Value, MigrationError> {
        if !self.can_migrate(from, to) {
            return Err(MigrationError::NoMigrationPath { from: from.to_string(), to: to.to_string() });
        }

        let mut current = from;
        while current != to {
            let Some(step) = self.steps.get(current) else {
                break;
            };
            (step.migrate)(&mut data).map_err(|reason| MigrationError::MigrationFailed {
                from: current.to_string(),
                to: step.to.to_string(),
                reason,
            })?;
            if let Some(root) = data.as_object_mut() {
                root.insert("saveVersion".to_string(), Value::String(step.to.to_string()));
            }
            tracing::info!(from = current, to = step.to, "migrated save data");
            current = step.to;
        }
        Ok(data)
    }

    /// Number of registered migration steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `"major.minor"`
pub fn parse_version(version: &str) -> Option<(u32, u32)> {
    let (major, minor) = version.split_once('.')?;
    Some((major.trim().parse().ok()?, minor.trim().parse().ok()?))
}

/// Brings a raw save tree up to [`CURRENT_SAVE_VERSION`]
///
/// A missing `saveVersion` is treated as [`LEGACY_SAVE_VERSION`]. Files from
/// a newer build are refused rather than half-read.
pub fn upgrade(data: Value) -> Result<Value, SaveError> {
    if !data.is_object() {
        return Err(SaveError::CorruptedData("save root is not an object".to_string()));
    }

    let found = match data.get("saveVersion") {
        None | Some(Value::Null) => LEGACY_SAVE_VERSION.to_string(),
        Some(Value::String(version)) => version.clone(),
        Some(other) => return Err(SaveError::InvalidVersion(other.to_string())),
    };

    let parsed = parse_version(&found).ok_or_else(|| SaveError::InvalidVersion(found.clone()))?;
    let current = parse_version(CURRENT_SAVE_VERSION).unwrap_or_default();
    if parsed > current {
        return Err(SaveError::UnsupportedVersion {
            found,
            supported: CURRENT_SAVE_VERSION.to_string(),
        });
    }
    if parsed == current {
        return Ok(data);
    }

    Ok(MigrationRegistry::builtin().migrate(data, &found, CURRENT_SAVE_VERSION)?)
}

// ===========================================================================
// Steps
// ===========================================================================

/// 1.0 stored per-color scores as `player1Scores` / `player2Scores` lists of
/// `{pieceType, score}` pairs and had no `revealedCells`.
fn migrate_1_0_to_1_1(data: &mut Value) -> Result<(), String> {
    let Some(root) = data.as_object_mut() else {
        return Err("save root is not an object".to_string());
    };

    if let Some(match3) = root.get_mut("match3").and_then(Value::as_object_mut) {
        let scores = [
            pair_list_to_map(match3.remove("player1Scores"))?,
            pair_list_to_map(match3.remove("player2Scores"))?,
        ];
        if !match3.contains_key("colorScores") {
            match3.insert("colorScores".to_string(), Value::Array(scores.into_iter().map(Value::Object).collect()));
        }
    }

    if let Some(maze) = root.get_mut("maze").and_then(Value::as_object_mut) {
        if !maze.contains_key("revealedCells") {
            let visited = maze.get("visitedCells").cloned().unwrap_or_else(|| Value::Array(Vec::new()));
            maze.insert("revealedCells".to_string(), visited);
        }
    }

    Ok(())
}

fn pair_list_to_map(pairs: Option<Value>) -> Result<Map<String, Value>, String> {
    let mut map = Map::new();
    let Some(pairs) = pairs else {
        return Ok(map);
    };
    let Value::Array(pairs) = pairs else {
        return Err("color score list is not an array".to_string());
    };

    for pair in pairs {
        let piece = pair
            .get("pieceType")
            .and_then(Value::as_i64)
            .and_then(|code| i32::try_from(code).ok())
            .and_then(crate::match3::PieceType::from_code);
        let Some(piece) = piece else {
            tracing::warn!(entry = %pair, "unknown piece type in color scores, entry dropped");
            continue;
        };
        let score = pair.get("score").and_then(Value::as_u64).unwrap_or(0);
        // Map keys are the variant names serde writes for PieceType
        map.insert(format!("{piece:?}"), Value::from(score));
    }
    Ok(map)
}

// ===========================================================================
// Tests
// ===========================================================================
