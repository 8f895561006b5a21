use serde::{Deserialize, Serialize};

use super::properties::{EquipmentSlot, ItemProperties};

/// The blueprint for an item type
///
/// This defines the static properties of an item that are shared
/// across all instances. Think of it as the "class" and ItemStack
/// as the "instance".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique name (used for lookups and saves)
    pub name: String,

    /// Description shown in tooltips
    pub description: String,

    /// Maximum stack size (1 = non-stackable, 99 = typical consumable)
    pub max_stack_size: u32,

    /// Item-specific properties and behaviors
    pub properties: ItemProperties,
}

impl ItemDefinition {
    /// Creates a new item definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        max_stack_size: u32,
        properties: ItemProperties,
    ) -> Self {
        ItemDefinition {
            name: name.into(),
            description: description.into(),
            max_stack_size,
            properties,
        }
    }

    /// Returns the equipment slot this item is worn in, if any
    pub fn equipment_slot(&self) -> Option<EquipmentSlot> {
        match &self.properties {
            ItemProperties::Equipment { slot, .. } => Some(*slot),
            _ => None,
        }
    }
}
