use crate::combat::DamageFormula;
use crate::config::RealmConfig;
use crate::env::MapOracle;
use crate::events::EventLog;
use crate::exchange::Exchange;
use crate::state::{Entity, EntityId, EntityStore, Tick};

use super::ActionError;

/// Everything an action may read or mutate while it executes.
///
/// Built by the realm once per tick and handed down by mutable reference;
/// actions observe the effects of every action executed before them.
pub struct ActionContext<'a> {
    pub tick: Tick,
    pub config: &'a RealmConfig,
    pub formula: &'a dyn DamageFormula,
    pub map: &'a dyn MapOracle,
    pub entities: &'a mut EntityStore,
    pub exchange: &'a mut Exchange,
    pub events: &'a mut EventLog,
}

impl ActionContext<'_> {
    /// The acting entity. The scheduler only dispatches live actors, so a
    /// miss here is an internal error.
    pub fn actor(&self, actor: EntityId) -> Result<&Entity, ActionError> {
        self.entities
            .get(actor)
            .ok_or(ActionError::ActorNotFound(actor))
    }

    pub fn actor_mut(&mut self, actor: EntityId) -> Result<&mut Entity, ActionError> {
        self.entities
            .get_mut(actor)
            .ok_or(ActionError::ActorNotFound(actor))
    }
}
