use std::collections::BTreeSet;

use crate::config::MapConfig;
use crate::state::Position;

/// Terrain collaborator.
///
/// The realm resets it with the world seed, steps it once per tick after
/// cull (resource regrowth and similar), and asks it whether a tile can be
/// entered when validating movement and spawns.
pub trait MapOracle: Send + Sync {
    fn reset(&mut self, seed: u64);

    fn step(&mut self) {}

    fn is_passable(&self, position: Position) -> bool;
}

/// Featureless map: every tile inside the playable area is passable except
/// for explicitly blocked ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenMap {
    border: i32,
    center: i32,
    blocked: BTreeSet<Position>,
}

impl OpenMap {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            border: config.border,
            center: config.center,
            blocked: BTreeSet::new(),
        }
    }

    /// Marks `position` impassable.
    pub fn block(&mut self, position: Position) {
        self.blocked.insert(position);
    }

    pub fn with_blocked(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.blocked.extend(positions);
        self
    }

    fn in_bounds(&self, position: Position) -> bool {
        let range = self.border..self.border + self.center;
        range.contains(&position.row) && range.contains(&position.col)
    }
}

impl MapOracle for OpenMap {
    fn reset(&mut self, _seed: u64) {}

    fn is_passable(&self, position: Position) -> bool {
        self.in_bounds(position) && !self.blocked.contains(&position)
    }
}
