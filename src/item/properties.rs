use serde::{Deserialize, Serialize};

use crate::stats::AbilityScores;

/// Different categories of items with type-specific data
///
/// This enum enables different item types to have different behaviors
/// while sharing the core ItemDefinition structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemProperties {
    /// Basic material (no special properties)
    Material,

    /// Consumable item (use from inventory)
    Consumable { effect: ConsumableEffect },

    /// Equipment item (worn for stat bonuses)
    Equipment {
        slot: EquipmentSlot,
        bonuses: AbilityScores,
        armor: i32,
    },
}

/// Effects for consumable items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    /// Restore health
    Heal(i32),

    /// Restore one charge of a spell
    RestoreCharge(String),
}

/// Equipment slots for items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Head,
    Chest,
    Legs,
    Feet,
    MainHand,
    OffHand,
    TwoHand,
    Ring,
}

impl EquipmentSlot {
    /// Every slot, in the order they appear on the character sheet
    pub fn all() -> [EquipmentSlot; 8] {
        [
            Self::Head,
            Self::Chest,
            Self::Legs,
            Self::Feet,
            Self::MainHand,
            Self::OffHand,
            Self::TwoHand,
            Self::Ring,
        ]
    }

    /// Position of this slot in [`EquipmentSlot::all`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Slots that must be emptied when something is worn here
    ///
    /// A two-handed weapon can't share the hands with anything else.
    pub fn blocks(&self) -> &'static [EquipmentSlot] {
        match self {
            Self::TwoHand => &[Self::MainHand, Self::OffHand],
            Self::MainHand | Self::OffHand => &[Self::TwoHand],
            _ => &[],
        }
    }
}
