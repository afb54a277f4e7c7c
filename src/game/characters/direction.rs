// Cardinal directions and direction-keyed tables

use glam::Vec2;
use std::ops::{Index, IndexMut};

/// One of the four cardinal directions a character can move or face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Every direction in declaration order.
    /// This is the iteration order used when resolving ties.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    fn slot(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Unit vector for this direction (north is +Y)
    pub fn unit(self) -> Vec2 {
        match self {
            Self::North => Vec2::Y,
            Self::East => Vec2::X,
            Self::South => Vec2::NEG_Y,
            Self::West => Vec2::NEG_X,
        }
    }

    /// Velocity of magnitude `speed` along this direction
    pub fn velocity(self, speed: f32) -> Vec2 {
        self.unit() * speed
    }

    /// Lowercase name, used for clip names and logging
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

/// A total map from [`Direction`] to `T`
///
/// Every direction always has a value, so lookups never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionMap<T> {
    slots: [T; 4],
}

impl<T> DirectionMap<T> {
    /// Build a map by evaluating `f` for each direction
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self {
            slots: Direction::ALL.map(&mut f),
        }
    }

    /// Iterate over (direction, value) pairs in [`Direction::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().zip(self.slots.iter())
    }
}

impl<T: Clone> DirectionMap<T> {
    /// A map holding `value` for every direction
    pub fn filled(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T> DirectionMap<Option<T>> {
    /// Check whether `direction` has an entry
    pub fn contains(&self, direction: Direction) -> bool {
        self[direction].is_some()
    }
}

impl<T> Index<Direction> for DirectionMap<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        &self.slots[direction.slot()]
    }
}

impl<T> IndexMut<Direction> for DirectionMap<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.slots[direction.slot()]
    }
}
