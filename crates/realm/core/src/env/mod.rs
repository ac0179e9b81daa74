//! Traits describing the collaborators around the simulation core.
//!
//! The realm owns one [`MapOracle`] and one [`NpcBrain`] as trait objects.
//! Neither is implemented here beyond trivial defaults; concrete
//! implementations live in the runtime or in tests.
mod map;
mod npc;

pub use map::{MapOracle, OpenMap};
pub use npc::{NpcBrain, PassiveBrain, WorldView};
