//! Milestone events emitted while a tick runs.
//!
//! Events are an observability hook, not a correctness dependency: the core
//! pushes them into an [`EventLog`] and mirrors each one as a `tracing`
//! record. Collaborators drain the log after `Realm::step` returns.

use crate::state::{CombatStyle, EntityId, ItemId, ItemKind, Tick};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RealmEvent {
    Damage {
        attacker: EntityId,
        target: EntityId,
        style: CombatStyle,
        amount: u32,
    },
    Kill {
        attacker: EntityId,
        target: EntityId,
        looted: usize,
    },
    Listed {
        seller: EntityId,
        item: ItemId,
        kind: ItemKind,
        level: u8,
        price: u32,
    },
    Purchased {
        buyer: EntityId,
        seller: EntityId,
        item: ItemId,
        kind: ItemKind,
        price: u32,
    },
    Expired {
        item: ItemId,
    },
    Died {
        entity: EntityId,
    },
}

impl RealmEvent {
    /// Short category label, e.g. for aggregating counts.
    pub fn category(&self) -> &'static str {
        match self {
            RealmEvent::Damage { .. } => "damage",
            RealmEvent::Kill { .. } => "kill",
            RealmEvent::Listed { .. } => "listed",
            RealmEvent::Purchased { .. } => "purchased",
            RealmEvent::Expired { .. } => "expired",
            RealmEvent::Died { .. } => "died",
        }
    }
}

/// Per-realm buffer of `(tick, event)` pairs.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<(Tick, RealmEvent)>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, event: RealmEvent) {
        tracing::debug!(tick = tick.0, category = event.category(), ?event, "milestone");
        self.events.push((tick, event));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Tick, RealmEvent)> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hands all buffered events to the caller and clears the buffer.
    pub fn drain(&mut self) -> Vec<(Tick, RealmEvent)> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
