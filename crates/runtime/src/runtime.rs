//! High-level simulation driver.
//!
//! The runtime owns a [`Realm`], asks its [`IntentProvider`] for player
//! intents each tick, steps the realm, records observer packets and tallies
//! the milestone events the realm emitted.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use realm_core::{
    DamageFormula, MapOracle, NpcBrain, Realm, RealmBuilder, RealmConfig, RealmEvent,
};

use crate::error::{Result, RuntimeError};
use crate::provider::{IdleProvider, IntentProvider};
use crate::recorder::SnapshotRecorder;

type BoxedRecorder = SnapshotRecorder<Box<dyn Write + Send>>;

/// Totals for one [`Runtime::run`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub survivors: usize,
    pub deaths: usize,
    pub expired_listings: usize,
    /// Event counts keyed by category.
    pub events: BTreeMap<&'static str, usize>,
    /// Hex-encoded state root after the last tick.
    pub state_root: String,
}

/// Main runtime that drives a realm tick by tick.
pub struct Runtime {
    realm: Realm,
    players: Box<dyn IntentProvider>,
    recorder: Option<BoxedRecorder>,
}

impl Runtime {
    pub fn builder(config: RealmConfig) -> RuntimeBuilder {
        RuntimeBuilder::new(config)
    }

    pub fn realm(&self) -> &Realm {
        &self.realm
    }

    pub fn realm_mut(&mut self) -> &mut Realm {
        &mut self.realm
    }

    /// Runs up to `ticks` ticks, stopping early once no player is left.
    pub fn run(&mut self, ticks: u64) -> Result<RunSummary> {
        let mut summary = RunSummary {
            seed: self.realm.seed(),
            ..RunSummary::default()
        };

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record(&self.realm.packet())?;
        }

        for _ in 0..ticks {
            if self.realm.population() == 0 {
                tracing::info!(tick = self.realm.tick().0, "no players left");
                break;
            }

            let intents = self.players.provide(&self.realm);
            let tick = self.realm.tick().0;
            let report = self
                .realm
                .step(&intents)
                .map_err(|source| RuntimeError::Step { tick, source })?;

            if let Some(recorder) = self.recorder.as_mut() {
                recorder.record(&self.realm.packet())?;
            }
            for (_, event) in self.realm.drain_events() {
                *summary.events.entry(event.category()).or_default() += 1;
                if let RealmEvent::Kill { attacker, target, .. } = event {
                    tracing::debug!(tick, %attacker, %target, "kill");
                }
            }

            summary.ticks += 1;
            summary.deaths += report.dead.len();
            summary.expired_listings += report.expired.len();

            tracing::debug!(
                tick,
                population = self.realm.population(),
                npcs = self.realm.entities().npc_count(),
                executed = report.execution.executed,
                no_ops = report.execution.no_ops,
                dead = report.dead.len(),
                "tick"
            );
        }

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.flush()?;
        }

        summary.survivors = self.realm.population();
        summary.state_root = hex::encode(self.realm.state_root());

        tracing::info!(
            ticks = summary.ticks,
            survivors = summary.survivors,
            deaths = summary.deaths,
            "run finished"
        );
        Ok(summary)
    }
}

/// Builder for [`Runtime`]. Realm collaborators pass straight through to
/// [`RealmBuilder`].
pub struct RuntimeBuilder {
    realm: RealmBuilder,
    players: Box<dyn IntentProvider>,
    recorder: Option<BoxedRecorder>,
}

impl RuntimeBuilder {
    pub fn new(config: RealmConfig) -> Self {
        Self {
            realm: RealmBuilder::new(config),
            players: Box::new(IdleProvider),
            recorder: None,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.realm = self.realm.seed(seed);
        self
    }

    pub fn damage_formula(mut self, formula: impl DamageFormula + 'static) -> Self {
        self.realm = self.realm.damage_formula(formula);
        self
    }

    pub fn map(mut self, map: impl MapOracle + 'static) -> Self {
        self.realm = self.realm.map(map);
        self
    }

    pub fn npc_brain(mut self, brain: impl NpcBrain + 'static) -> Self {
        self.realm = self.realm.npc_brain(brain);
        self
    }

    pub fn players(mut self, provider: impl IntentProvider + 'static) -> Self {
        self.players = Box::new(provider);
        self
    }

    /// Records one packet per tick (plus the initial state) to `writer`.
    pub fn recorder(mut self, writer: impl Write + Send + 'static) -> Self {
        let writer: Box<dyn Write + Send> = Box::new(writer);
        self.recorder = Some(SnapshotRecorder::new(writer));
        self
    }

    pub fn build(self) -> Result<Runtime> {
        let realm = self.realm.build()?;
        Ok(Runtime {
            realm,
            players: self.players,
            recorder: self.recorder,
        })
    }
}
