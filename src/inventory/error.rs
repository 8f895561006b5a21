use crate::item::EquipmentSlot;

/// Errors that can occur during inventory and equipment operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// Slot index out of bounds
    #[error("Invalid slot index: {0}")]
    InvalidSlot(usize),

    /// Item name doesn't exist in the catalog
    #[error("Invalid item ID: {0}")]
    InvalidItem(String),

    /// Slot is occupied (can't place different item)
    #[error("Slot {0} is occupied")]
    SlotOccupied(usize),

    /// Item can't be worn at all
    #[error("Item '{0}' is not equipment")]
    NotEquippable(String),

    /// Item is worn somewhere other than where it was asked to go
    #[error("Item '{item}' does not fit the {slot:?} slot")]
    WrongSlot { item: String, slot: EquipmentSlot },
}
