//! Offense, defense and damage calculation.

use crate::config::{RealmConfig, Systems};
use crate::state::{CombatStyle, Entity};

// ============================================================================
// Damage Formula
// ============================================================================

/// Strategy that turns offense, defense and the weakness multiplier into a
/// raw damage value.
///
/// The resolver rounds the result and clamps it at zero, so implementations
/// may return fractional or negative values.
pub trait DamageFormula: Send + Sync {
    fn damage(&self, offense: f32, defense: f32, multiplier: f32) -> f32;
}

/// Default formula: `multiplier * (offense - defense)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearDamage;

impl DamageFormula for LinearDamage {
    fn damage(&self, offense: f32, defense: f32, multiplier: f32) -> f32 {
        multiplier * (offense - defense)
    }
}

impl<F> DamageFormula for F
where
    F: Fn(f32, f32, f32) -> f32 + Send + Sync,
{
    fn damage(&self, offense: f32, defense: f32, multiplier: f32) -> f32 {
        self(offense, defense, multiplier)
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Weakness multiplier for `style` attacking `defender`.
///
/// The defender's dominant style is the combat skill with the most
/// experience. If the attack style is that style's weakness the configured
/// multiplier applies, otherwise `1.0`.
pub fn weakness_multiplier(config: &RealmConfig, style: CombatStyle, defender: &Entity) -> f32 {
    match defender.skills.dominant_style() {
        Some(dominant) if dominant.weakness() == style => config.combat.weakness_multiplier,
        _ => 1.0,
    }
}

/// Attacker's offense for `style`.
///
/// ```text
/// offense = base_damage + level_damage * style_level + equipment_offense
/// ```
///
/// With progression disabled the flat combat damage applies and level
/// damage is zero.
pub fn offense(config: &RealmConfig, style: CombatStyle, attacker: &Entity) -> f32 {
    let (base_damage, level_damage) = if config.enabled(Systems::PROGRESSION) {
        let progression = &config.progression;
        match style {
            CombatStyle::Melee => (progression.melee_base_damage, progression.melee_level_damage),
            CombatStyle::Range => (progression.range_base_damage, progression.range_level_damage),
            CombatStyle::Mage => (progression.mage_base_damage, progression.mage_level_damage),
        }
    } else {
        let combat = &config.combat;
        let base = match style {
            CombatStyle::Melee => combat.melee_damage,
            CombatStyle::Range => combat.range_damage,
            CombatStyle::Mage => combat.mage_damage,
        };
        (base, 0.0)
    };

    let level = f32::from(attacker.skills.level(style.skill()));
    let equipment = if config.enabled(Systems::EQUIPMENT) {
        attacker.inventory.offense_total(style, &config.equipment)
    } else {
        0.0
    };

    base_damage + level_damage * level + equipment
}

/// Defender's defense.
///
/// ```text
/// defense = base_defense + level_defense * overall_level + equipment_defense
/// ```
pub fn defense(config: &RealmConfig, defender: &Entity) -> f32 {
    let skill_defense = if config.enabled(Systems::PROGRESSION) {
        let level = f32::from(defender.skills.overall_level());
        config.progression.base_defense + config.progression.level_defense * level
    } else {
        0.0
    };

    let equipment = if config.enabled(Systems::EQUIPMENT) {
        defender.inventory.defense_total(&config.equipment)
    } else {
        0.0
    };

    skill_defense + equipment
}

/// Final damage: rounded, never negative.
pub fn calculate_damage(formula: &dyn DamageFormula, offense: f32, defense: f32, multiplier: f32) -> u32 {
    let raw = formula.damage(offense, defense, multiplier).round();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        raw as u32
    }
}
