// Item system module
//
// This module provides the item catalog the save system resolves names against:
// - Item definitions and properties
// - Item catalog for lookups by name
// - Item stacks for quantity management

pub mod catalog;
pub mod definition;
pub mod properties;
pub mod stack;

// Re-export main types for convenient access
pub use catalog::ItemCatalog;
pub use definition::ItemDefinition;
pub use properties::{ConsumableEffect, EquipmentSlot, ItemProperties};
pub use stack::ItemStack;
