use std::collections::HashMap;

use super::definition::ItemDefinition;
use super::properties::*;
use crate::stats::AbilityScores;

/// Central catalog of all item definitions
///
/// This is the single source of truth for what items exist in the game.
/// All item references (in inventories, equipment, saves) use names that
/// look up definitions in this catalog.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: HashMap<String, ItemDefinition>,
}

impl ItemCatalog {
    /// Creates a new empty catalog
    pub fn new() -> Self {
        ItemCatalog {
            items: HashMap::new(),
        }
    }

    /// Creates a catalog with all game items pre-registered
    pub fn create_default() -> Self {
        let mut catalog = Self::new();
        for item in base_items() {
            // Base item names are unique by construction
            let _ = catalog.register(item);
        }
        catalog
    }

    /// Registers a new item definition
    ///
    /// Returns error if an item with this name already exists.
    pub fn register(&mut self, item: ItemDefinition) -> Result<(), String> {
        if self.items.contains_key(&item.name) {
            return Err(format!("Item '{}' already registered", item.name));
        }

        self.items.insert(item.name.clone(), item);
        Ok(())
    }

    /// Removes an item definition, returning it if it existed
    ///
    /// Used when content is retired between releases.
    pub fn unregister(&mut self, name: &str) -> Option<ItemDefinition> {
        self.items.remove(name)
    }

    /// Gets an item definition by name
    ///
    /// Returns None if no item with this name exists.
    pub fn get(&self, name: &str) -> Option<&ItemDefinition> {
        self.items.get(name)
    }

    /// Returns true if an item with this name exists
    pub fn exists(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Number of registered items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::create_default()
    }
}

// ======================================================================
// Base Game Items
// ======================================================================

fn equipment(name: &str, description: &str, slot: EquipmentSlot, bonuses: AbilityScores, armor: i32) -> ItemDefinition {
    ItemDefinition::new(name, description, 1, ItemProperties::Equipment { slot, bonuses, armor })
}

fn base_items() -> Vec<ItemDefinition> {
    vec![
        equipment(
            "Sword",
            "A plain steel blade.",
            EquipmentSlot::MainHand,
            AbilityScores { strength: 1, ..Default::default() },
            0,
        ),
        equipment(
            "Shield",
            "Round wooden shield with an iron rim.",
            EquipmentSlot::OffHand,
            AbilityScores::default(),
            2,
        ),
        equipment(
            "Greatsword",
            "Needs both hands and a strong back.",
            EquipmentSlot::TwoHand,
            AbilityScores { strength: 2, dexterity: -1, ..Default::default() },
            0,
        ),
        equipment(
            "Leather Cap",
            "Better than nothing.",
            EquipmentSlot::Head,
            AbilityScores::default(),
            1,
        ),
        equipment(
            "Chainmail",
            "Heavy but dependable.",
            EquipmentSlot::Chest,
            AbilityScores { dexterity: -1, ..Default::default() },
            4,
        ),
        equipment(
            "Greaves",
            "Plated leg guards.",
            EquipmentSlot::Legs,
            AbilityScores::default(),
            2,
        ),
        equipment(
            "Swift Boots",
            "Light boots for quick feet.",
            EquipmentSlot::Feet,
            AbilityScores { dexterity: 1, ..Default::default() },
            1,
        ),
        equipment(
            "Ring of Insight",
            "Hums faintly near secrets.",
            EquipmentSlot::Ring,
            AbilityScores { wisdom: 2, intelligence: 1, ..Default::default() },
            0,
        ),
        ItemDefinition::new(
            "Potion",
            "Restores 20 health when consumed.",
            20,
            ItemProperties::Consumable { effect: ConsumableEffect::Heal(20) },
        ),
        ItemDefinition::new(
            "Mana Crystal",
            "Restores a spell charge.",
            10,
            ItemProperties::Consumable { effect: ConsumableEffect::RestoreCharge("Firebolt".to_string()) },
        ),
        ItemDefinition::new("Stone Shard", "A fragment of one of the six stones.", 99, ItemProperties::Material),
    ]
}
