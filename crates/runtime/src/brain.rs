//! NPC controllers.
//!
//! [`IdleBrain`] leaves every NPC standing still. [`MeanderBrain`] is a
//! seeded random walk: an NPC next to a live player attacks it with its
//! dominant style, otherwise it may wander one tile.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use realm_core::{
    ActionSet, AttackAction, CombatStyle, Direction, Entity, Intents, MoveAction, NpcBrain,
    WorldView,
};

const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

/// Keeps NPC behaviour independent of the realm's own generator stream.
const BRAIN_SEED_SALT: u64 = 0x6d65_616e_6465_72;

#[derive(Clone, Copy, Debug, Default)]
pub struct IdleBrain;

impl NpcBrain for IdleBrain {
    fn decide(&mut self, _world: &WorldView<'_>) -> Intents {
        Intents::new()
    }
}

#[derive(Clone, Debug)]
pub struct MeanderBrain {
    rng: ChaCha8Rng,
    /// Chance per tick that an unengaged NPC takes a step.
    wander: f64,
}

impl Default for MeanderBrain {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl MeanderBrain {
    pub fn new(wander: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(BRAIN_SEED_SALT),
            wander: wander.clamp(0.0, 1.0),
        }
    }

    fn prey<'a>(world: &WorldView<'a>, npc: &Entity) -> Option<&'a Entity> {
        let reach = world.config.combat.melee_reach;
        world
            .entities
            .players()
            .filter(|player| player.is_alive())
            .find(|player| npc.position.distance(player.position) <= reach)
    }
}

impl NpcBrain for MeanderBrain {
    fn reset(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed ^ BRAIN_SEED_SALT);
    }

    fn decide(&mut self, world: &WorldView<'_>) -> Intents {
        let mut intents = Intents::new();

        for npc in world.entities.npcs().filter(|npc| npc.is_alive()) {
            if let Some(player) = Self::prey(world, npc) {
                let style = npc.skills.dominant_style().unwrap_or(CombatStyle::Melee);
                intents.insert(
                    npc.id,
                    ActionSet::new().with(AttackAction {
                        target: player.id,
                        style,
                    }),
                );
                continue;
            }

            if self.rng.random_bool(self.wander) {
                let direction = DIRECTIONS[self.rng.random_range(0..DIRECTIONS.len())];
                let destination = npc.position.offset(direction);
                if world.map.is_passable(destination) {
                    intents.insert(npc.id, ActionSet::new().with(MoveAction { direction }));
                }
            }
        }

        intents
    }
}
