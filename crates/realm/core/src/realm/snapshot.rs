//! Read-only views published for observers and reward consumers.

use crate::exchange::MarketSummary;
use crate::state::{Entity, EntityId, EntityStore, History, Position, Tick};

/// Minimal per-entity state carried in a [`TickSnapshot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySummary {
    pub id: EntityId,
    pub position: Position,
    pub health: u32,
}

/// Replay/observer packet, produced on demand by `Realm::packet`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSnapshot {
    pub tick: Tick,
    pub entities: Vec<EntitySummary>,
    pub market: MarketSummary,
}

impl TickSnapshot {
    pub fn entity(&self, id: EntityId) -> Option<&EntitySummary> {
        self.entities.iter().find(|summary| summary.id == id)
    }
}

/// Attributes of one player as seen by reward/task consumers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityAttributes {
    pub id: EntityId,
    pub team: Option<u32>,
    pub position: Position,
    pub health: u32,
    pub food: u32,
    pub water: u32,
    pub gold: u32,
    pub level: u8,
    pub equipment_level: u32,
    pub inventory_size: usize,
    pub alive: bool,
    pub history: History,
}

impl From<&Entity> for EntityAttributes {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            team: entity.team,
            position: entity.position,
            health: entity.health.current,
            food: entity.food.current,
            water: entity.water.current,
            gold: entity.gold,
            level: entity.skills.overall_level(),
            equipment_level: entity.inventory.equipment_level(),
            inventory_size: entity.inventory.len(),
            alive: entity.is_alive(),
            history: entity.history,
        }
    }
}

/// Per-tick game state, built after the post-action update and before cull
/// so agents that died this tick are still present with their final state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStateSnapshot {
    pub tick: Tick,
    /// Every player, ascending id.
    pub players: Vec<EntityAttributes>,
}

/// One agent's slice of a [`GameStateSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentView<'a> {
    pub tick: Tick,
    pub own: &'a EntityAttributes,
    /// Own team, the agent included.
    pub team: Vec<&'a EntityAttributes>,
    pub all_teams: &'a [EntityAttributes],
}

impl GameStateSnapshot {
    pub fn build(tick: Tick, entities: &EntityStore) -> Self {
        Self {
            tick,
            players: entities.players().map(EntityAttributes::from).collect(),
        }
    }

    pub fn get(&self, agent: EntityId) -> Option<&EntityAttributes> {
        self.players.iter().find(|attributes| attributes.id == agent)
    }

    pub fn view_for(&self, agent: EntityId) -> Option<AgentView<'_>> {
        let own = self.get(agent)?;
        let team = self
            .players
            .iter()
            .filter(|attributes| attributes.team == own.team)
            .collect();
        Some(AgentView {
            tick: self.tick,
            own,
            team,
            all_teams: &self.players,
        })
    }
}
