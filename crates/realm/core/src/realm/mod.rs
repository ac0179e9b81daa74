//! Tick orchestrator.
//!
//! [`Realm`] owns every piece of mutable world state (entities, exchange,
//! random generator, clock) and the collaborators around it. One call to
//! [`Realm::step`] is one uninterrupted tick:
//!
//! 1. ask the NPC brain for intents
//! 2. merge player and NPC intents into priority buckets and execute them
//! 3. post-action updates (death fog, resources)
//! 4. publish the game state, then cull the dead
//! 5. step the map
//! 6. expire stale listings
//! 7. advance the clock
//!
//! Observers pull the per-tick packet through [`Realm::packet`].
mod builder;
mod root;
mod snapshot;
mod update;

pub use builder::RealmBuilder;
pub use root::state_root;
pub use snapshot::{AgentView, EntityAttributes, EntitySummary, GameStateSnapshot, TickSnapshot};

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strum::IntoEnumIterator;

use crate::action::{ActionContext, ActionError, ActionKind, Intents};
use crate::combat::{DamageFormula, spawn_position};
use crate::config::RealmConfig;
use crate::env::{MapOracle, NpcBrain, WorldView};
use crate::error::{ErrorSeverity, GameError};
use crate::events::{EventLog, RealmEvent};
use crate::exchange::{Exchange, ExchangeError};
use crate::scheduler::{ActionScheduler, ExecutionSummary};
use crate::state::{CombatStyle, Entity, EntityId, EntityStore, ItemId, Position, Tick};

/// Candidate positions tried per spawn before settling on an occupied tile.
const SPAWN_ATTEMPTS: usize = 16;

/// Errors that abort a tick.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("{} action by {actor} failed: {error}", .kind.as_str())]
    Action {
        actor: EntityId,
        kind: ActionKind,
        #[source]
        error: ActionError,
    },

    #[error("intents submitted for unknown entity {0}")]
    UnknownActor(EntityId),

    #[error("exchange invariant violated: {0}")]
    Invariant(#[from] ExchangeError),
}

impl GameError for StepError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StepError::Action { error, .. } => error.severity(),
            StepError::UnknownActor(_) => ErrorSeverity::Validation,
            StepError::Invariant(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StepError::Action { error, .. } => error.error_code(),
            StepError::UnknownActor(_) => "STEP_UNKNOWN_ACTOR",
            StepError::Invariant(_) => "STEP_INVARIANT",
        }
    }
}

/// What one tick did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// The tick that was executed (the clock now reads `tick + 1`).
    pub tick: Tick,
    /// Entities culled this tick, in their final state.
    pub dead: Vec<Entity>,
    pub execution: ExecutionSummary,
    /// Listings that expired this tick.
    pub expired: Vec<ItemId>,
}

impl StepReport {
    pub fn dead_ids(&self) -> Vec<EntityId> {
        self.dead.iter().map(|entity| entity.id).collect()
    }
}

/// The simulated world.
pub struct Realm {
    config: RealmConfig,
    formula: Box<dyn DamageFormula>,
    map: Box<dyn MapOracle>,
    npc_brain: Box<dyn NpcBrain>,
    scheduler: ActionScheduler,
    rng: ChaCha8Rng,
    seed: u64,
    tick: Tick,
    entities: EntityStore,
    exchange: Exchange,
    events: EventLog,
    game_state: GameStateSnapshot,
}

impl fmt::Debug for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Realm")
            .field("seed", &self.seed)
            .field("tick", &self.tick)
            .field("players", &self.entities.player_count())
            .field("npcs", &self.entities.npc_count())
            .field("listings", &self.exchange.len())
            .finish_non_exhaustive()
    }
}

impl Realm {
    pub fn builder(config: RealmConfig) -> RealmBuilder {
        RealmBuilder::new(config)
    }

    fn from_parts(
        config: RealmConfig,
        formula: Box<dyn DamageFormula>,
        map: Box<dyn MapOracle>,
        npc_brain: Box<dyn NpcBrain>,
    ) -> Self {
        Self {
            config,
            formula,
            map,
            npc_brain,
            scheduler: ActionScheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(0),
            seed: 0,
            tick: Tick::ZERO,
            entities: EntityStore::new(),
            exchange: Exchange::new(),
            events: EventLog::new(),
            game_state: GameStateSnapshot::default(),
        }
    }

    // ===== accessors =====

    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Direct store access for scenario setup between ticks.
    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    pub fn population(&self) -> usize {
        self.entities.player_count()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Hands over every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<(Tick, RealmEvent)> {
        self.events.drain()
    }

    /// Game state published by the most recent tick (or reset).
    pub fn game_state(&self) -> &GameStateSnapshot {
        &self.game_state
    }

    /// Observer packet for the current state.
    pub fn packet(&self) -> TickSnapshot {
        TickSnapshot {
            tick: self.tick,
            entities: self
                .entities
                .iter()
                .map(|entity| EntitySummary {
                    id: entity.id,
                    position: entity.position,
                    health: entity.health.current,
                })
                .collect(),
            market: self.exchange.packet(&self.entities),
        }
    }

    pub fn state_root(&self) -> [u8; 32] {
        state_root(self.tick, &self.entities, &self.exchange)
    }

    // ===== lifecycle =====

    /// Rebuilds the world from `seed`: clock, generator, item counter,
    /// exchange and population all start over.
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.tick = Tick::ZERO;
        self.entities.reset();
        self.exchange.clear();
        self.events.clear();
        self.scheduler.clear();
        self.map.reset(seed);
        self.npc_brain.reset(seed);

        self.spawn_population();
        self.game_state = GameStateSnapshot::build(self.tick, &self.entities);

        tracing::info!(
            seed,
            players = self.entities.player_count(),
            npcs = self.entities.npc_count(),
            "realm reset"
        );
    }

    fn spawn_population(&mut self) {
        let population = self.config.population.clone();
        let teams = population.teams.max(1);

        for index in 0..population.players {
            let position = self.find_spawn(0.0);
            self.entities
                .spawn_player(position, index % teams, &self.config);
        }

        let max_level = self.config.progression.max_level.max(1);
        for _ in 0..population.npcs {
            let danger: f32 = self.rng.random_range(0.0..1.0);
            let position = self.find_spawn(danger);
            let id = self.entities.spawn_npc(position, &self.config);

            let level = 1 + (danger * f32::from(max_level - 1)) as u8;
            if let Some(npc) = self.entities.get_mut(id) {
                for style in CombatStyle::iter() {
                    npc.skills
                        .set_level(style.skill(), level, &self.config.progression);
                }
            }
        }
    }

    fn find_spawn(&mut self, danger: f32) -> Position {
        let mut candidate = spawn_position(&self.config.map, danger, &mut self.rng);
        for _ in 1..SPAWN_ATTEMPTS {
            if self.map.is_passable(candidate) && self.entities.occupant(candidate).is_none() {
                break;
            }
            candidate = spawn_position(&self.config.map, danger, &mut self.rng);
        }
        candidate
    }

    /// Runs one tick with the given player intents.
    ///
    /// Intents naming an entity that does not exist are rejected before any
    /// state changes. A contract violation inside an action aborts the tick
    /// part-way; the realm should then be reset.
    pub fn step(&mut self, actions: &Intents) -> Result<StepReport, StepError> {
        let span = tracing::debug_span!("step", tick = self.tick.0);
        let _guard = span.enter();

        if let Some(&unknown) = actions.keys().find(|id| !self.entities.contains(**id)) {
            return Err(StepError::UnknownActor(unknown));
        }

        let npc_intents: Intents = {
            let view = WorldView {
                tick: self.tick,
                config: &self.config,
                entities: &self.entities,
                map: &*self.map,
            };
            self.npc_brain
                .decide(&view)
                .into_iter()
                .filter(|(id, _)| id.is_npc() && self.entities.contains(*id))
                .collect()
        };

        self.scheduler.submit(actions);
        self.scheduler.submit(&npc_intents);

        let execution = {
            let mut ctx = ActionContext {
                tick: self.tick,
                config: &self.config,
                formula: &*self.formula,
                map: &*self.map,
                entities: &mut self.entities,
                exchange: &mut self.exchange,
                events: &mut self.events,
            };
            self.scheduler.execute(&mut self.rng, &mut ctx)
        }
        .inspect_err(|error| tracing::warn!(%error, "tick aborted"))?;

        update::post_action_update(&self.config, self.tick, &mut self.entities);
        self.game_state = GameStateSnapshot::build(self.tick, &self.entities);

        let dead = self.cull();

        self.map.step();

        let expired = self.exchange.step(
            &mut self.entities,
            self.tick,
            self.config.exchange.listing_duration,
        );
        for &item in &expired {
            self.events.push(self.tick, RealmEvent::Expired { item });
        }

        #[cfg(debug_assertions)]
        self.exchange.check_invariants(&self.entities)?;

        let executed = self.tick;
        self.tick = self.tick + 1;

        tracing::debug!(
            executed = execution.executed,
            no_ops = execution.no_ops,
            dead = dead.len(),
            expired = expired.len(),
            "tick complete"
        );

        Ok(StepReport {
            tick: executed,
            dead,
            execution,
            expired,
        })
    }

    /// Removes every dead entity together with its listings.
    fn cull(&mut self) -> Vec<Entity> {
        let dying: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|entity| !entity.is_alive())
            .map(|entity| entity.id)
            .collect();
        for &id in &dying {
            self.exchange.unlist_seller(&mut self.entities, id);
        }

        let dead = self.entities.cull();
        for entity in &dead {
            self.events
                .push(self.tick, RealmEvent::Died { entity: entity.id });
        }
        dead
    }
}
