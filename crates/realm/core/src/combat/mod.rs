//! Combat resolver.
//!
//! [`damage`] holds the pure offense/defense arithmetic and the injectable
//! [`DamageFormula`]; [`resolve`] applies an attack to the entity store;
//! [`zone`] covers position-dependent rules (spawn rings, death fog).
pub mod damage;
pub mod resolve;
pub mod zone;

pub use damage::{
    DamageFormula, LinearDamage, calculate_damage, defense, offense, weakness_multiplier,
};
pub use resolve::{AttackReport, attack};
pub use zone::{danger, fog_damage, spawn_position};
