//! Six Stones save/restore engine
//!
//! Captures the live game (party, pack, gear, maze crawl, battle board and
//! options) into numbered JSON save slots and rebuilds it on load. Mazes are
//! stored as a seed and regenerated, so only the party's progress through
//! them is written to disk.

pub mod config;
pub mod game;
pub mod input_system;
pub mod inventory;
pub mod item;
pub mod match3;
pub mod maze;
pub mod options;
pub mod save;
pub mod scene;
pub mod spells;
pub mod stats;
pub mod status;
