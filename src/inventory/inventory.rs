use super::error::InventoryError;
use crate::item::{ItemCatalog, ItemStack};

/// Most slots an inventory can be rebuilt with
pub const MAX_INVENTORY_SLOTS: usize = 200;

/// Contract the save system uses to read and rebuild an inventory
///
/// Gameplay addresses inventory slots by index, so everything here is
/// index-preserving: empty slots are part of the snapshot.
pub trait InventoryProvider {
    /// Number of slots, including empty ones
    fn capacity(&self) -> usize;

    /// Every slot in index order (None = empty)
    fn snapshot(&self) -> Vec<Option<ItemStack>>;

    /// Empties every slot and resizes to `capacity`
    fn reset(&mut self, capacity: usize);

    /// Adds items wherever they fit, returning the overflow
    fn add_item(&mut self, item_id: &str, quantity: u32, catalog: &ItemCatalog) -> Result<u32, InventoryError>;

    /// Puts a stack into a specific slot
    fn place_in_slot(
        &mut self,
        slot_index: usize,
        item_stack: ItemStack,
        catalog: &ItemCatalog,
    ) -> Result<Option<ItemStack>, InventoryError>;
}

/// Generic inventory container with slots
///
/// This is the core storage structure used by the party. It handles slot
/// management, stacking, and basic operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    /// Slots that can hold item stacks (None = empty)
    slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    /// Creates a new empty inventory with the specified capacity
    pub fn new(capacity: usize) -> Self {
        Inventory {
            slots: vec![None; capacity],
        }
    }

    /// Returns true if the inventory has no items
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Gets the stack in a slot
    pub fn get(&self, slot_index: usize) -> Option<&ItemStack> {
        self.slots.get(slot_index).and_then(|slot| slot.as_ref())
    }

    /// Counts how many of a specific item are in the inventory
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref())
            .filter(|stack| stack.item_id == item_id)
            .map(|stack| stack.quantity)
            .sum()
    }

    /// Finds the first empty slot index
    pub fn find_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    /// Removes items from the inventory
    ///
    /// Returns the number of items actually removed (might be less than requested).
    pub fn remove_item(&mut self, item_id: &str, quantity: u32) -> u32 {
        let mut remaining = quantity;
        let mut removed_total = 0;

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }

            if let Some(stack) = slot {
                if stack.item_id == item_id {
                    let to_take = remaining.min(stack.quantity);
                    stack.quantity -= to_take;
                    remaining -= to_take;
                    removed_total += to_take;

                    // Clear slot if empty
                    if stack.is_empty() {
                        *slot = None;
                    }
                }
            }
        }

        removed_total
    }
}

impl InventoryProvider for Inventory {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn snapshot(&self) -> Vec<Option<ItemStack>> {
        self.slots.clone()
    }

    fn reset(&mut self, capacity: usize) {
        self.slots.clear();
        self.slots.resize(capacity, None);
    }

    /// Adds items to the inventory
    ///
    /// Returns the number of items that couldn't fit (overflow).
    ///
    /// # Strategy
    /// 1. Try to stack with existing items first
    /// 2. Create new stacks in empty slots
    /// 3. Return overflow if inventory is full
    fn add_item(&mut self, item_id: &str, quantity: u32, catalog: &ItemCatalog) -> Result<u32, InventoryError> {
        if quantity == 0 {
            return Ok(0);
        }

        let max_stack_size = catalog
            .get(item_id)
            .ok_or_else(|| InventoryError::InvalidItem(item_id.to_string()))?
            .max_stack_size;
        let mut remaining = quantity;

        // Phase 1: Try to add to existing stacks
        for stack in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if stack.item_id == item_id && stack.quantity < max_stack_size {
                remaining = stack.add(remaining, max_stack_size);
            }
        }

        // Phase 2: Create new stacks in empty slots
        while remaining > 0 {
            let Some(empty_index) = self.find_empty_slot() else {
                break;
            };
            let stack_size = remaining.min(max_stack_size);
            self.slots[empty_index] = Some(ItemStack::new(item_id, stack_size));
            remaining -= stack_size;
        }

        Ok(remaining)
    }

    /// Places items in a specific slot
    ///
    /// If the slot is empty, places the item.
    /// If the slot has the same item, tries to stack.
    /// Returns overflow items that didn't fit.
    fn place_in_slot(
        &mut self,
        slot_index: usize,
        item_stack: ItemStack,
        catalog: &ItemCatalog,
    ) -> Result<Option<ItemStack>, InventoryError> {
        if slot_index >= self.slots.len() {
            return Err(InventoryError::InvalidSlot(slot_index));
        }

        let max_stack = catalog
            .get(&item_stack.item_id)
            .ok_or_else(|| InventoryError::InvalidItem(item_stack.item_id.clone()))?
            .max_stack_size;

        match &mut self.slots[slot_index] {
            None => {
                let overflow = item_stack.quantity.saturating_sub(max_stack);
                let placed = ItemStack::new(item_stack.item_id.clone(), item_stack.quantity.min(max_stack));
                self.slots[slot_index] = Some(placed);
                Ok((overflow > 0).then(|| ItemStack::new(item_stack.item_id, overflow)))
            }
            Some(existing_stack) if existing_stack.item_id == item_stack.item_id => {
                let overflow = existing_stack.add(item_stack.quantity, max_stack);
                Ok((overflow > 0).then(|| ItemStack::new(item_stack.item_id, overflow)))
            }
            Some(_) => Err(InventoryError::SlotOccupied(slot_index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_stacks_then_fills() {
        let catalog = ItemCatalog::create_default();
        let mut inventory = Inventory::new(3);

        assert_eq!(inventory.add_item("Potion", 25, &catalog), Ok(0));
        assert_eq!(inventory.get(0), Some(&ItemStack::new("Potion", 20)));
        assert_eq!(inventory.get(1), Some(&ItemStack::new("Potion", 5)));
        assert_eq!(inventory.count_item("Potion"), 25);
    }

    #[test]
    fn test_add_unknown_item() {
        let catalog = ItemCatalog::create_default();
        let mut inventory = Inventory::new(3);
        assert_eq!(
            inventory.add_item("Cursed Idol", 1, &catalog),
            Err(InventoryError::InvalidItem("Cursed Idol".to_string()))
        );
    }

    #[test]
    fn test_place_in_slot_keeps_index() {
        let catalog = ItemCatalog::create_default();
        let mut inventory = Inventory::new(6);

        inventory.place_in_slot(5, ItemStack::new("Shield", 1), &catalog).unwrap();
        assert_eq!(inventory.find_empty_slot(), Some(0));
        assert_eq!(inventory.get(5).map(|s| s.item_id.as_str()), Some("Shield"));
    }

    #[test]
    fn test_place_in_occupied_slot() {
        let catalog = ItemCatalog::create_default();
        let mut inventory = Inventory::new(2);
        inventory.place_in_slot(0, ItemStack::new("Sword", 1), &catalog).unwrap();

        let result = inventory.place_in_slot(0, ItemStack::new("Potion", 1), &catalog);
        assert_eq!(result, Err(InventoryError::SlotOccupied(0)));
        assert_eq!(
            inventory.place_in_slot(9, ItemStack::new("Potion", 1), &catalog),
            Err(InventoryError::InvalidSlot(9))
        );
    }

    #[test]
    fn test_remove_item_clears_slot() {
        let catalog = ItemCatalog::create_default();
        let mut inventory = Inventory::new(2);
        inventory.add_item("Potion", 3, &catalog).unwrap();

        assert_eq!(inventory.remove_item("Potion", 5), 3);
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_reset_resizes() {
        let catalog = ItemCatalog::create_default();
        let mut inventory = Inventory::new(2);
        inventory.add_item("Potion", 3, &catalog).unwrap();

        inventory.reset(8);
        assert_eq!(inventory.capacity(), 8);
        assert!(inventory.is_empty());
    }
}
