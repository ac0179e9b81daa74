//! Item instances and their static properties.
//!
//! An item is owned by exactly one inventory. While it is offered on the
//! exchange its `listed_price` is non-zero; the exchange keeps a listing keyed
//! by [`ItemId`] rather than a pointer back to the item.

use strum::{EnumIter, IntoStaticStr};

use super::{CombatStyle, ItemId};
use crate::config::EquipmentConfig;

/// Equipment slot occupied by an equipped item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentSlot {
    Weapon,
    Hat,
    Top,
    Bottom,
    Ammunition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    // Weapons
    Sword,
    Bow,
    Wand,
    // Armour
    Hat,
    Top,
    Bottom,
    // Ammunition
    Scrap,
    Shaving,
    Shard,
    // Consumables
    Ration,
    Poultice,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub const fn slot(self) -> Option<EquipmentSlot> {
        match self {
            ItemKind::Sword | ItemKind::Bow | ItemKind::Wand => Some(EquipmentSlot::Weapon),
            ItemKind::Hat => Some(EquipmentSlot::Hat),
            ItemKind::Top => Some(EquipmentSlot::Top),
            ItemKind::Bottom => Some(EquipmentSlot::Bottom),
            ItemKind::Scrap | ItemKind::Shaving | ItemKind::Shard => {
                Some(EquipmentSlot::Ammunition)
            }
            ItemKind::Ration | ItemKind::Poultice => None,
        }
    }

    /// Combat style boosted by this weapon or ammunition.
    pub const fn style(self) -> Option<CombatStyle> {
        match self {
            ItemKind::Sword | ItemKind::Scrap => Some(CombatStyle::Melee),
            ItemKind::Bow | ItemKind::Shaving => Some(CombatStyle::Range),
            ItemKind::Wand | ItemKind::Shard => Some(CombatStyle::Mage),
            _ => None,
        }
    }

    pub const fn is_ammunition(self) -> bool {
        matches!(self, ItemKind::Scrap | ItemKind::Shaving | ItemKind::Shard)
    }

    pub const fn is_armour(self) -> bool {
        matches!(self, ItemKind::Hat | ItemKind::Top | ItemKind::Bottom)
    }

    pub const fn is_consumable(self) -> bool {
        matches!(self, ItemKind::Ration | ItemKind::Poultice)
    }
}

/// A concrete item instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub level: u8,
    pub quantity: u32,
    /// Non-zero iff the exchange holds an active listing for this item.
    pub listed_price: u32,
    pub equipped: bool,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind, level: u8, quantity: u32) -> Self {
        Self {
            id,
            kind,
            level,
            quantity,
            listed_price: 0,
            equipped: false,
        }
    }

    pub fn is_listed(&self) -> bool {
        self.listed_price != 0
    }

    /// Offense this item adds to attacks of `style`.
    pub fn offense(&self, style: CombatStyle, config: &EquipmentConfig) -> f32 {
        if self.kind.style() != Some(style) {
            return 0.0;
        }
        let level = f32::from(self.level);
        if self.kind.is_ammunition() {
            config.ammunition_base_damage + config.ammunition_level_damage * level
        } else {
            config.weapon_base_damage + config.weapon_level_damage * level
        }
    }

    /// Defense this item adds against attacks of any style.
    pub fn defense(&self, config: &EquipmentConfig) -> f32 {
        if !self.kind.is_armour() {
            return 0.0;
        }
        config.armour_base_defense + config.armour_level_defense * f32::from(self.level)
    }
}
