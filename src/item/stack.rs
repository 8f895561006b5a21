use serde::{Deserialize, Serialize};

/// An instance of an item with quantity
///
/// This represents a specific amount of an item type. It's stored
/// in inventory slots and references its definition by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Name of the item definition in ItemCatalog
    pub item_id: String,

    /// How many of this item (1 to max_stack_size)
    pub quantity: u32,
}

impl ItemStack {
    /// Creates a new item stack
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        ItemStack {
            item_id: item_id.into(),
            quantity,
        }
    }

    /// Adds items to this stack
    ///
    /// Returns how many items couldn't fit (overflow)
    pub fn add(&mut self, amount: u32, max_stack_size: u32) -> u32 {
        let total = self.quantity + amount;

        if total <= max_stack_size {
            self.quantity = total;
            0
        } else {
            self.quantity = max_stack_size;
            total - max_stack_size
        }
    }

    /// Returns true if this stack is empty
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}
