//! Bounded per-entity inventory and the equipment view over it.

use arrayvec::ArrayVec;

use super::{CombatStyle, EquipmentSlot, Item, ItemId};
use crate::config::{EquipmentConfig, RealmConfig};

/// Inventory holding at most `capacity` items.
///
/// Equipment is not a separate container: an equipped item stays in the
/// inventory with `equipped = true`, at most one per [`EquipmentSlot`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: ArrayVec<Item, { RealmConfig::MAX_INVENTORY_SLOTS }>,
    capacity: usize,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: ArrayVec::new(),
            capacity: capacity.min(RealmConfig::MAX_INVENTORY_SLOTS),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_space(&self) -> bool {
        self.items.len() < self.capacity
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Adds an item, handing it back when the inventory is full.
    pub fn receive(&mut self, item: Item) -> Result<(), Item> {
        if !self.has_space() {
            return Err(item);
        }
        self.items.try_push(item).map_err(|err| err.element())
    }

    /// Removes an item, clearing its equipped flag.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let mut item = self.items.remove(index);
        item.equipped = false;
        Some(item)
    }

    /// Removes every item, in inventory order.
    pub fn drain(&mut self) -> Vec<Item> {
        self.items
            .drain(..)
            .map(|mut item| {
                item.equipped = false;
                item
            })
            .collect()
    }

    pub fn equipped(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.equipped)
    }

    pub fn equipped_in(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.equipped().find(|item| item.kind.slot() == Some(slot))
    }

    /// Toggles the equipped state of an item.
    ///
    /// Equipping displaces whatever occupied the same slot. Returns the new
    /// equipped state, or `None` if the item cannot be equipped.
    pub fn toggle_equip(&mut self, id: ItemId) -> Option<bool> {
        let slot = self.get(id)?.kind.slot()?;
        let now_equipped = !self.get(id)?.equipped;

        if now_equipped {
            for other in self.items.iter_mut() {
                if other.equipped && other.kind.slot() == Some(slot) {
                    other.equipped = false;
                }
            }
        }

        let item = self.get_mut(id)?;
        item.equipped = now_equipped;
        Some(now_equipped)
    }

    /// Sum of offense for `style` across equipped gear.
    pub fn offense_total(&self, style: CombatStyle, config: &EquipmentConfig) -> f32 {
        self.equipped().map(|item| item.offense(style, config)).sum()
    }

    /// Sum of defense across equipped gear.
    pub fn defense_total(&self, config: &EquipmentConfig) -> f32 {
        self.equipped().map(|item| item.defense(config)).sum()
    }

    /// Sum of equipped item levels, reported alongside damage milestones.
    pub fn equipment_level(&self) -> u32 {
        self.equipped().map(|item| u32::from(item.level)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ItemKind;

    fn item(id: u32, kind: ItemKind) -> Item {
        Item::new(ItemId(id), kind, 1, 1)
    }

    #[test]
    fn receive_respects_capacity() {
        let mut inventory = Inventory::new(2);
        assert!(inventory.receive(item(1, ItemKind::Hat)).is_ok());
        assert!(inventory.receive(item(2, ItemKind::Top)).is_ok());
        let rejected = inventory.receive(item(3, ItemKind::Bottom));
        assert_eq!(rejected.map_err(|item| item.id), Err(ItemId(3)));
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn equipping_displaces_same_slot() {
        let mut inventory = Inventory::new(4);
        inventory.receive(item(1, ItemKind::Sword)).unwrap();
        inventory.receive(item(2, ItemKind::Bow)).unwrap();

        assert_eq!(inventory.toggle_equip(ItemId(1)), Some(true));
        assert_eq!(inventory.toggle_equip(ItemId(2)), Some(true));

        assert!(!inventory.get(ItemId(1)).unwrap().equipped);
        assert_eq!(
            inventory.equipped_in(EquipmentSlot::Weapon).map(|i| i.id),
            Some(ItemId(2))
        );
    }

    #[test]
    fn consumables_cannot_be_equipped() {
        let mut inventory = Inventory::new(4);
        inventory.receive(item(1, ItemKind::Ration)).unwrap();
        assert_eq!(inventory.toggle_equip(ItemId(1)), None);
    }

    #[test]
    fn removal_unequips() {
        let mut inventory = Inventory::new(4);
        inventory.receive(item(1, ItemKind::Hat)).unwrap();
        inventory.toggle_equip(ItemId(1));
        let removed = inventory.remove(ItemId(1)).unwrap();
        assert!(!removed.equipped);
        assert!(inventory.is_empty());
    }
}
