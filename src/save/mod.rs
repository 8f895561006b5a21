//! Save/Load system for Six Stones
//!
//! This module provides the slot-based save system with:
//! - JSON save files (human-readable, debuggable)
//! - Numbered save slots (1-10), each with a one-level backup
//! - A safety gate so nothing is saved while the board is animating
//! - Migration of older save files on load
//!
//! # Architecture
//!
//! - `types`: Save data structures
//! - `error`: Error types
//! - `capture`: live game → `SaveData`
//! - `restore`: `SaveData` → live game
//! - `gate`: save safety gate and the settle wait
//! - `migration`: upgrading older save files
//! - `manager`: SlotManager for file operations
//!
//! # Example Usage
//!
//! ```no_run
//! use six_stones::config::SaveConfig;
//! use six_stones::game::GameWorld;
//! use six_stones::item::ItemCatalog;
//! use six_stones::save::{self, AlwaysSafe, SlotManager};
//!
//! let catalog = ItemCatalog::create_default();
//! let mut world = GameWorld::new_game(&catalog);
//! let manager = SlotManager::new(&SaveConfig::default())?;
//!
//! manager.save(1, &AlwaysSafe, || save::capture(&world, 60.0))?;
//! if let Some(data) = manager.load(1)? {
//!     let report = save::restore(&data, &mut world, &catalog);
//!     assert!(report.is_clean());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod capture;
pub mod error;
pub mod gate;
pub mod manager;
pub mod migration;
pub mod restore;
pub mod types;

// Re-export commonly used types
pub use capture::{capture, capture_at};
pub use error::{SaveError, SlotRangeError};
pub use gate::{AlwaysSafe, BoardSafetyGate, SaveGate, SettleWait, WaitStatus};
pub use manager::{LoadSource, SaveOutcome, SlotInfo, SlotManager};
pub use migration::{MigrationError, MigrationRegistry};
pub use restore::{RestoreError, RestoreReport, RestoreSection, RestoreWarning, restore};
pub use types::*;
