use super::{EntityId, Inventory, Position, ResourceMeter, Skills};
use crate::config::RealmConfig;

/// Counters read by external reward/task consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History {
    pub damage_inflicted: u32,
    pub damage_received: u32,
    pub player_kills: u32,
}

/// Canonical attribute state of one live agent.
///
/// # Invariants
///
/// - `alive == false` implies the entity is culled before the tick ends
/// - every item with a non-zero `listed_price` has a matching exchange listing
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    /// Team index for players; NPCs have none.
    pub team: Option<u32>,
    pub position: Position,

    pub health: ResourceMeter,
    pub food: ResourceMeter,
    pub water: ResourceMeter,

    pub skills: Skills,
    pub inventory: Inventory,
    pub gold: u32,

    pub immortal: bool,
    pub alive: bool,
    pub history: History,
}

impl Entity {
    /// Create an entity with full resource pools and an empty inventory.
    pub fn new(id: EntityId, position: Position, config: &RealmConfig) -> Self {
        let resources = &config.resources;
        Self {
            id,
            team: None,
            position,
            health: ResourceMeter::full(resources.base_health),
            food: ResourceMeter::full(resources.base_food),
            water: ResourceMeter::full(resources.base_water),
            skills: Skills::default(),
            inventory: Inventory::new(config.player.inventory_capacity),
            gold: 0,
            immortal: false,
            alive: true,
            history: History::default(),
        }
    }

    pub fn with_team(mut self, team: u32) -> Self {
        self.team = Some(team);
        self
    }

    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    pub fn with_immortal(mut self, immortal: bool) -> Self {
        self.immortal = immortal;
        self
    }

    #[inline]
    pub fn is_npc(&self) -> bool {
        self.id.is_npc()
    }

    /// Quick liveness check used by the scheduler and cull.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive && self.health.current > 0
    }

    /// Reduces health by `amount` and flips the alive flag at zero.
    ///
    /// Immortal entities ignore damage entirely. Returns the damage actually
    /// taken.
    pub fn receive_damage(&mut self, amount: u32) -> u32 {
        if self.immortal {
            return 0;
        }
        let taken = self.health.decrement(amount);
        self.history.damage_received = self.history.damage_received.saturating_add(taken);
        if self.health.is_empty() {
            self.alive = false;
        }
        taken
    }
}
