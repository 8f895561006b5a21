// Inventory system module
//
// This module provides the live containers the save system captures and restores:
// - Generic inventory container with index-addressed slots
// - Equipment worn by the party, one item per slot

pub mod equipment;
pub mod error;
pub mod inventory;

// Re-export main types
pub use equipment::{BASE_ARMOR_CLASS, Equipment, EquipmentProvider};
pub use error::InventoryError;
pub use inventory::{Inventory, InventoryProvider, MAX_INVENTORY_SLOTS};
