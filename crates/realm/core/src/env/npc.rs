use crate::action::Intents;
use crate::config::RealmConfig;
use crate::state::{EntityStore, Tick};

use super::MapOracle;

/// Read-only world handed to NPC controllers.
#[derive(Clone, Copy)]
pub struct WorldView<'a> {
    pub tick: Tick,
    pub config: &'a RealmConfig,
    pub entities: &'a EntityStore,
    pub map: &'a dyn MapOracle,
}

/// NPC controller collaborator.
///
/// Called once per tick before any action executes. Returned intents have
/// the same shape as player intents; entries for ids that are not live NPCs
/// are dropped by the realm.
pub trait NpcBrain: Send {
    fn reset(&mut self, _seed: u64) {}

    fn decide(&mut self, world: &WorldView<'_>) -> Intents;
}

/// Brain whose NPCs never act.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveBrain;

impl NpcBrain for PassiveBrain {
    fn decide(&mut self, _world: &WorldView<'_>) -> Intents {
        Intents::new()
    }
}
