use std::fmt;

/// Unique identifier for any entity tracked by the store.
///
/// The sign bit is reserved: negative identifiers are NPCs, non-negative
/// identifiers are players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub i32);

impl EntityId {
    /// Returns true if this entity is a non-player character.
    #[inline]
    pub const fn is_npc(self) -> bool {
        self.0 < 0
    }

    /// Returns true if this entity is player-controlled.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_npc() {
            write!(f, "npc#{}", -self.0)
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Instance identifier for an item. Allocated by the entity store and reset
/// together with the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Discrete grid position expressed as (row, col) tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Chebyshev (king-move) distance, the metric used for reach and zones.
    pub fn distance(&self, other: Position) -> u32 {
        let dr = (self.row - other.row).unsigned_abs();
        let dc = (self.col - other.col).unsigned_abs();
        dr.max(dc)
    }

    pub fn offset(&self, direction: Direction) -> Position {
        let (dr, dc) = direction.delta();
        Position::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Row/column delta for one step in this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }
}

/// Discrete simulation time unit. One tick is one full `Realm::step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Ticks elapsed since `earlier`, saturating at zero.
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer resource pool (health, food, water) tracked per entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Removes up to `amount`, returning how much was actually removed.
    pub fn decrement(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds up to `amount` without exceeding the maximum.
    pub fn increment(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.maximum);
    }

    /// True when the pool holds more than half of its maximum.
    pub fn above_half(&self) -> bool {
        self.current * 2 > self.maximum
    }
}
