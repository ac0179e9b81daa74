use crate::combat::{DamageFormula, LinearDamage};
use crate::config::{ConfigError, RealmConfig};
use crate::env::{MapOracle, NpcBrain, OpenMap, PassiveBrain};

use super::Realm;

/// Builder for [`Realm`].
///
/// Collaborators left unset fall back to defaults: [`LinearDamage`], an
/// [`OpenMap`] sized from the config, and a [`PassiveBrain`].
pub struct RealmBuilder {
    config: RealmConfig,
    seed: u64,
    formula: Option<Box<dyn DamageFormula>>,
    map: Option<Box<dyn MapOracle>>,
    npc_brain: Option<Box<dyn NpcBrain>>,
}

impl RealmBuilder {
    pub fn new(config: RealmConfig) -> Self {
        Self {
            config,
            seed: 0,
            formula: None,
            map: None,
            npc_brain: None,
        }
    }

    /// Seed for the initial reset.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Damage strategy used by every attack in this realm.
    pub fn damage_formula(mut self, formula: impl DamageFormula + 'static) -> Self {
        self.formula = Some(Box::new(formula));
        self
    }

    pub fn map(mut self, map: impl MapOracle + 'static) -> Self {
        self.map = Some(Box::new(map));
        self
    }

    pub fn npc_brain(mut self, brain: impl NpcBrain + 'static) -> Self {
        self.npc_brain = Some(Box::new(brain));
        self
    }

    /// Validates the config and returns a realm already reset with the seed.
    pub fn build(self) -> Result<Realm, ConfigError> {
        self.config.validate()?;

        let map = self
            .map
            .unwrap_or_else(|| Box::new(OpenMap::new(&self.config.map)));
        let formula = self.formula.unwrap_or_else(|| Box::new(LinearDamage));
        let npc_brain = self.npc_brain.unwrap_or_else(|| Box::new(PassiveBrain));

        let mut realm = Realm::from_parts(self.config, formula, map, npc_brain);
        realm.reset(self.seed);
        Ok(realm)
    }
}
