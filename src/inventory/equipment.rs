use super::error::InventoryError;
use crate::item::{EquipmentSlot, ItemDefinition, ItemProperties};
use crate::stats::AbilityScores;

/// Armor class of a character wearing nothing
pub const BASE_ARMOR_CLASS: i32 = 10;

/// Contract the save system uses to read and rebuild worn equipment
pub trait EquipmentProvider {
    /// Name of the item worn in `slot`
    fn equipped_name(&self, slot: EquipmentSlot) -> Option<&str>;

    /// Removes everything
    fn unequip_all(&mut self);

    /// Wears an item in its own slot, returning everything it displaced
    ///
    /// A two-handed weapon displaces both hands, and a one-handed item or
    /// shield displaces a two-handed weapon.
    fn equip(&mut self, item: &ItemDefinition) -> Result<Vec<ItemDefinition>, InventoryError>;

    /// Summed ability bonuses from everything worn
    fn ability_bonuses(&self) -> AbilityScores;

    /// Armor class including worn armor and dexterity
    fn armor_class(&self) -> i32;
}

/// Items worn by the party
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Equipment {
    slots: [Option<ItemDefinition>; 8],
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&ItemDefinition> {
        self.slots[slot.index()].as_ref()
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<ItemDefinition> {
        self.slots[slot.index()].take()
    }

    fn worn(&self) -> impl Iterator<Item = (&AbilityScores, i32)> {
        self.slots.iter().flatten().filter_map(|item| match &item.properties {
            ItemProperties::Equipment { bonuses, armor, .. } => Some((bonuses, *armor)),
            _ => None,
        })
    }
}

impl EquipmentProvider for Equipment {
    fn equipped_name(&self, slot: EquipmentSlot) -> Option<&str> {
        self.get(slot).map(|item| item.name.as_str())
    }

    fn unequip_all(&mut self) {
        self.slots = Default::default();
    }

    fn equip(&mut self, item: &ItemDefinition) -> Result<Vec<ItemDefinition>, InventoryError> {
        let slot = item
            .equipment_slot()
            .ok_or_else(|| InventoryError::NotEquippable(item.name.clone()))?;
        let mut displaced: Vec<ItemDefinition> =
            slot.blocks().iter().filter_map(|&other| self.unequip(other)).collect();
        displaced.extend(self.slots[slot.index()].replace(item.clone()));
        Ok(displaced)
    }

    fn ability_bonuses(&self) -> AbilityScores {
        self.worn().fold(AbilityScores::default(), |total, (bonuses, _)| total.add(bonuses))
    }

    fn armor_class(&self) -> i32 {
        let armor: i32 = self.worn().map(|(_, armor)| armor).sum();
        BASE_ARMOR_CLASS + armor + self.ability_bonuses().dexterity
    }
}
