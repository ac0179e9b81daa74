//! Realm configuration constants and tunable parameters.
//!
//! Compile-time capacities are associated constants on [`RealmConfig`];
//! everything a scenario may tune is a field with a documented default.
//! The damage formula is deliberately absent: it is behaviour, not data, and
//! is injected through [`crate::RealmBuilder::damage_formula`].

use bitflags::bitflags;

bitflags! {
    /// Optional game subsystems. Disabled subsystems contribute nothing to
    /// combat totals and their actions become no-ops.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Systems: u8 {
        /// Equipped gear adds offense/defense; ammunition is consumed.
        const EQUIPMENT   = 1 << 0;
        /// Skill levels scale damage and defense.
        const PROGRESSION = 1 << 1;
        /// Inventories hold items; kills transfer loot.
        const ITEM        = 1 << 2;
        /// Sell/Buy actions and listing expiry.
        const EXCHANGE    = 1 << 3;
        /// Food/water depletion and health regeneration.
        const RESOURCE    = 1 << 4;
    }
}

impl Default for Systems {
    fn default() -> Self {
        Systems::all()
    }
}

/// Errors raised by [`RealmConfig::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("inventory capacity {capacity} must be within 1..={max}")]
    InventoryCapacity { capacity: usize, max: usize },

    #[error("{players} players cannot be split across zero teams")]
    NoTeams { players: u32 },

    #[error("map center must be positive (got {0})")]
    MapCenter(i32),

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
}

impl crate::error::GameError for ConfigError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InventoryCapacity { .. } => "CONFIG_INVENTORY_CAPACITY",
            ConfigError::NoTeams { .. } => "CONFIG_NO_TEAMS",
            ConfigError::MapCenter(_) => "CONFIG_MAP_CENTER",
            ConfigError::NonPositive { .. } => "CONFIG_NON_POSITIVE",
            ConfigError::Negative { .. } => "CONFIG_NEGATIVE",
        }
    }
}

/// Playable area. Tiles in `[border, border + center)` on both axes are
/// inside the map; everything else is the impassable border ring.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    pub border: i32,
    pub center: i32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            border: 16,
            center: 128,
        }
    }
}

impl MapConfig {
    /// Coordinate of the central tile on both axes.
    pub fn midpoint(&self) -> i32 {
        self.border + self.center / 2
    }

    pub fn contains(&self, position: crate::state::Position) -> bool {
        let lo = self.border;
        let hi = self.border + self.center;
        (lo..hi).contains(&position.row) && (lo..hi).contains(&position.col)
    }
}

/// Who gets spawned on `Realm::reset`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopulationConfig {
    pub players: u32,
    pub teams: u32,
    pub npcs: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            players: 16,
            teams: 4,
            npcs: 8,
        }
    }
}

/// Player-only rules: inventory size, starting gold, the death fog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    /// Immortal players ignore all incoming damage.
    pub immortal: bool,
    pub inventory_capacity: usize,
    pub starting_gold: u32,
    /// Tick at which the death fog starts closing in. `None` disables it.
    pub death_fog_start: Option<u64>,
    /// Extra fog damage per tick since the fog started.
    pub death_fog_speed: f32,
    /// Radius around the map midpoint that the fog never reaches.
    pub death_fog_final_size: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            immortal: false,
            inventory_capacity: 12,
            starting_gold: 1,
            death_fog_start: None,
            death_fog_speed: 1.0 / 16.0,
            death_fog_final_size: 8,
        }
    }
}

/// Health/food/water pools and their per-tick dynamics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceConfig {
    pub base_health: u32,
    pub base_food: u32,
    pub base_water: u32,
    pub depletion_rate: u32,
    pub starvation_rate: u32,
    pub dehydration_rate: u32,
    pub health_regen: u32,
    pub ration_restore: u32,
    pub poultice_restore: u32,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            base_health: 100,
            base_food: 100,
            base_water: 100,
            depletion_rate: 5,
            starvation_rate: 10,
            dehydration_rate: 10,
            health_regen: 10,
            ration_restore: 50,
            poultice_restore: 50,
        }
    }
}

/// Flat per-style damage used when progression is disabled, plus reach.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    pub melee_damage: f32,
    pub range_damage: f32,
    pub mage_damage: f32,
    pub melee_reach: u32,
    pub range_reach: u32,
    pub mage_reach: u32,
    /// Multiplier applied when the attack style exploits the defender's
    /// dominant style.
    pub weakness_multiplier: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            melee_damage: 30.0,
            range_damage: 30.0,
            mage_damage: 30.0,
            melee_reach: 1,
            range_reach: 3,
            mage_reach: 4,
            weakness_multiplier: 1.5,
        }
    }
}

/// Level-scaled damage and defense, and the experience curve.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionConfig {
    pub melee_base_damage: f32,
    pub melee_level_damage: f32,
    pub range_base_damage: f32,
    pub range_level_damage: f32,
    pub mage_base_damage: f32,
    pub mage_level_damage: f32,
    pub base_defense: f32,
    pub level_defense: f32,
    /// Experience granted to the attack style per attack.
    pub combat_xp: u32,
    /// Experience step of the triangular level table.
    pub level_exp: u32,
    pub max_level: u8,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            melee_base_damage: 20.0,
            melee_level_damage: 5.0,
            range_base_damage: 20.0,
            range_level_damage: 5.0,
            mage_base_damage: 20.0,
            mage_level_damage: 5.0,
            base_defense: 0.0,
            level_defense: 5.0,
            combat_xp: 10,
            level_exp: 10,
            max_level: 10,
        }
    }
}

/// Offense/defense contributed by equipped gear.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentConfig {
    pub weapon_base_damage: f32,
    pub weapon_level_damage: f32,
    pub ammunition_base_damage: f32,
    pub ammunition_level_damage: f32,
    pub armour_base_defense: f32,
    pub armour_level_defense: f32,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            weapon_base_damage: 15.0,
            weapon_level_damage: 15.0,
            ammunition_base_damage: 15.0,
            ammunition_level_damage: 15.0,
            armour_base_defense: 0.0,
            armour_level_defense: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExchangeConfig {
    /// A listing expires once `current_tick - listing_tick > listing_duration`.
    pub listing_duration: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            listing_duration: 5,
        }
    }
}

/// Complete realm configuration.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RealmConfig {
    pub systems: Systems,
    pub map: MapConfig,
    pub population: PopulationConfig,
    pub player: PlayerConfig,
    pub resources: ResourceConfig,
    pub combat: CombatConfig,
    pub progression: ProgressionConfig,
    pub equipment: EquipmentConfig,
    pub exchange: ExchangeConfig,
}

impl RealmConfig {
    // ===== compile-time constants used as type parameters =====
    /// Hard upper bound on inventory slots; `player.inventory_capacity` may
    /// only narrow it.
    pub const MAX_INVENTORY_SLOTS: usize = 32;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self, systems: Systems) -> bool {
        self.systems.contains(systems)
    }

    /// Validate configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacity = self.player.inventory_capacity;
        if capacity == 0 || capacity > Self::MAX_INVENTORY_SLOTS {
            return Err(ConfigError::InventoryCapacity {
                capacity,
                max: Self::MAX_INVENTORY_SLOTS,
            });
        }

        if self.population.players > 0 && self.population.teams == 0 {
            return Err(ConfigError::NoTeams {
                players: self.population.players,
            });
        }

        if self.map.center <= 0 {
            return Err(ConfigError::MapCenter(self.map.center));
        }

        if self.combat.melee_reach == 0 || self.combat.range_reach == 0 || self.combat.mage_reach == 0
        {
            return Err(ConfigError::NonPositive {
                field: "combat reach",
            });
        }

        if self.progression.max_level == 0 {
            return Err(ConfigError::NonPositive {
                field: "progression.max_level",
            });
        }

        if self.progression.level_exp == 0 {
            return Err(ConfigError::NonPositive {
                field: "progression.level_exp",
            });
        }

        for (field, value) in [
            ("combat.weakness_multiplier", self.combat.weakness_multiplier),
            ("player.death_fog_speed", self.player.death_fog_speed),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }
}
