//! Save system configuration
//!
//! Where saves live, how many slots there are and how long a hotkey save
//! waits for the board to settle.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Number of numbered save slots
pub const DEFAULT_MAX_SLOTS: u32 = 10;

/// How long a hotkey save waits for the board to stop animating
pub const DEFAULT_SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct SaveConfig {
    /// Directory holding `gamesave_slot<N>.json` files
    pub save_dir: PathBuf,
    /// Highest valid slot number (slots start at 1)
    pub max_slots: u32,
    /// Upper bound on the hotkey save's settle wait
    pub settle_timeout: Duration,
    /// Slot used by quick save / quick load
    pub quick_save_slot: u32,
}

impl SaveConfig {
    /// Default save directory
    ///
    /// `<data dir>/SixStones/Saves`, or `./saves` if the platform has no
    /// data directory.
    pub fn default_save_dir() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("SixStones").join("Saves"))
            .unwrap_or_else(|| PathBuf::from("./saves"))
    }

    /// Same settings, different directory
    pub fn with_save_dir(mut self, save_dir: impl AsRef<Path>) -> Self {
        self.save_dir = save_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = timeout;
        self
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        SaveConfig {
            save_dir: Self::default_save_dir(),
            max_slots: DEFAULT_MAX_SLOTS,
            settle_timeout: DEFAULT_SETTLE_TIMEOUT,
            quick_save_slot: 1,
        }
    }
}
