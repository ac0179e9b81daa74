//! Skill levels derived from accumulated experience.

use strum::{EnumCount, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::config::ProgressionConfig;

/// Every trainable skill. Combat styles come first, in the fixed order used
/// to break ties when finding a defender's dominant style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumCount, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SkillKind {
    Melee,
    Range,
    Mage,
    Fishing,
    Herbalism,
    Prospecting,
    Carving,
    Alchemy,
}

/// The three combat styles an attack can use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatStyle {
    Melee,
    Range,
    Mage,
}

impl CombatStyle {
    pub const fn skill(self) -> SkillKind {
        match self {
            CombatStyle::Melee => SkillKind::Melee,
            CombatStyle::Range => SkillKind::Range,
            CombatStyle::Mage => SkillKind::Mage,
        }
    }

    /// The style that deals bonus damage to defenders specialised in `self`.
    pub const fn weakness(self) -> CombatStyle {
        match self {
            CombatStyle::Melee => CombatStyle::Mage,
            CombatStyle::Range => CombatStyle::Melee,
            CombatStyle::Mage => CombatStyle::Range,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Experience and cached level for one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub exp: u32,
    pub level: u8,
}

impl Default for Skill {
    fn default() -> Self {
        Self { exp: 0, level: 1 }
    }
}

/// Level reached with `exp` experience.
///
/// Triangular table: reaching level `L` costs `level_exp * L * (L - 1) / 2`
/// total experience, so each level costs `level_exp` more than the last.
pub fn level_for_exp(exp: u32, config: &ProgressionConfig) -> u8 {
    let step = u64::from(config.level_exp.max(1));
    let exp = u64::from(exp);
    let mut level: u8 = 1;
    while level < config.max_level {
        let next = u64::from(level) + 1;
        if exp < step * next * (next - 1) / 2 {
            break;
        }
        level += 1;
    }
    level
}

/// All skills of one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skills {
    skills: [Skill; SkillKind::COUNT],
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            skills: [Skill::default(); SkillKind::COUNT],
        }
    }
}

impl Skills {
    pub fn get(&self, kind: SkillKind) -> Skill {
        self.skills[kind as usize]
    }

    pub fn level(&self, kind: SkillKind) -> u8 {
        self.get(kind).level
    }

    /// Highest level across every skill; used as the defender's overall level.
    pub fn overall_level(&self) -> u8 {
        self.skills.iter().map(|s| s.level).max().unwrap_or(1)
    }

    pub fn add_exp(&mut self, kind: SkillKind, exp: u32, config: &ProgressionConfig) {
        let skill = &mut self.skills[kind as usize];
        skill.exp = skill.exp.saturating_add(exp);
        skill.level = level_for_exp(skill.exp, config);
    }

    /// Directly set a skill's level (spawning NPCs of a given tier, tests).
    pub fn set_level(&mut self, kind: SkillKind, level: u8, config: &ProgressionConfig) {
        let level = level.clamp(1, config.max_level);
        let next = u32::from(level);
        let skill = &mut self.skills[kind as usize];
        skill.exp = config.level_exp * next * (next - 1) / 2;
        skill.level = level;
    }

    /// Combat style with the most experience.
    ///
    /// Returns `None` when all three styles are tied, which means the
    /// defender has no specialisation to exploit. Otherwise ties favour the
    /// earlier style in `Melee, Range, Mage` order.
    pub fn dominant_style(&self) -> Option<CombatStyle> {
        let exps: Vec<(CombatStyle, u32)> = CombatStyle::iter()
            .map(|style| (style, self.get(style.skill()).exp))
            .collect();

        let max = exps.iter().map(|(_, exp)| *exp).max()?;
        let min = exps.iter().map(|(_, exp)| *exp).min()?;
        if max == min {
            return None;
        }

        exps.into_iter()
            .find(|(_, exp)| *exp == max)
            .map(|(style, _)| style)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillKind, Skill)> + '_ {
        SkillKind::iter().map(|kind| (kind, self.get(kind)))
    }
}
