//! Canonical entity and item state.
//!
//! This module owns the data structures that describe agents, their skills
//! and inventories. The [`EntityStore`] is the only owner; the scheduler,
//! combat resolver and exchange hold identifiers, never references.
mod common;
mod entity;
mod inventory;
mod item;
mod skills;
mod store;

pub use common::{Direction, EntityId, ItemId, Position, ResourceMeter, Tick};
pub use entity::{Entity, History};
pub use inventory::Inventory;
pub use item::{EquipmentSlot, Item, ItemKind};
pub use skills::{CombatStyle, Skill, SkillKind, Skills, level_for_exp};
pub use store::EntityStore;
