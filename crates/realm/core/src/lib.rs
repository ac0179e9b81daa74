//! Deterministic per-tick core of a multi-agent survival world.
//!
//! `realm-core` defines the canonical rules (entities, combat, exchange,
//! actions) and the tick orchestrator that drives them. All state mutation
//! flows through [`Realm::step`]; collaborators such as maps, NPC brains and
//! recorders plug in through the traits in [`env`] and [`combat`].
pub mod action;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod exchange;
pub mod realm;
pub mod scheduler;
pub mod state;

pub use action::{
    Action, ActionContext, ActionError, ActionKind, ActionOutcome, ActionSet, ActionTransition,
    AttackAction, BuyAction, DestroyAction, GiveAction, Intents, MoveAction, SellAction,
    SkipReason, UseAction,
};
pub use combat::{AttackReport, DamageFormula, LinearDamage};
pub use config::{ConfigError, RealmConfig, Systems};
pub use env::{MapOracle, NpcBrain, OpenMap, PassiveBrain, WorldView};
pub use error::{ErrorSeverity, GameError};
pub use events::{EventLog, RealmEvent};
pub use exchange::{BuyOutcome, Exchange, ExchangeError, Listing, MarketEntry, MarketSummary};
pub use realm::{
    AgentView, EntityAttributes, EntitySummary, GameStateSnapshot, Realm, RealmBuilder,
    StepError, StepReport, TickSnapshot,
};
pub use scheduler::{ActionScheduler, ExecutionSummary};
pub use state::{
    CombatStyle, Direction, Entity, EntityId, EntityStore, EquipmentSlot, History, Inventory,
    Item, ItemId, ItemKind, Position, ResourceMeter, Skill, SkillKind, Skills, Tick,
};
