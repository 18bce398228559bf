//! Absolute headings and relative turns.
//!
//! Everything that depends on neighbor order goes through [`Heading::CROSS_ORDER`]. The grid
//! enumerates cross neighbors in that order and the turn tables below are built from it, so the
//! two can't drift apart.

use crate::dims::Dims;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    West,
    North,
    East,
    South,
}

/// Turn relative to the current heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Right,
    Forward,
    Left,
    Back,
}

impl Heading {
    /// Canonical cross-neighbor order. Consecutive entries are a quarter turn clockwise apart
    /// (y grows downwards).
    pub const CROSS_ORDER: [Heading; 4] = [
        Heading::West,
        Heading::North,
        Heading::East,
        Heading::South,
    ];

    pub fn index(self) -> usize {
        match self {
            Heading::West => 0,
            Heading::North => 1,
            Heading::East => 2,
            Heading::South => 3,
        }
    }

    pub fn from_index(idx: usize) -> Heading {
        Self::CROSS_ORDER[idx % Self::CROSS_ORDER.len()]
    }

    pub fn offset(self) -> Dims {
        match self {
            Heading::West => Dims(-1, 0),
            Heading::North => Dims(0, -1),
            Heading::East => Dims(1, 0),
            Heading::South => Dims(0, 1),
        }
    }

    pub fn from_offset(off: Dims) -> Option<Heading> {
        Self::CROSS_ORDER.into_iter().find(|h| h.offset() == off)
    }

    /// Heading of a single step `from -> to`.
    ///
    /// Steps that wrapped around a toroidal edge are longer than one cell and point the wrong
    /// way, so any step whose length is not 1 on its axis is flipped.
    pub fn between(from: Dims, to: Dims) -> Option<Heading> {
        let delta = to - from;
        match delta {
            Dims(0, 0) => None,
            Dims(dx, 0) if dx.abs() == 1 => Self::from_offset(delta),
            Dims(0, dy) if dy.abs() == 1 => Self::from_offset(delta),
            Dims(dx, 0) => Self::from_offset(Dims(-dx.signum(), 0)),
            Dims(0, dy) => Self::from_offset(Dims(0, -dy.signum())),
            _ => None,
        }
    }

    pub fn turn(self, turn: Turn) -> Heading {
        Self::from_index(self.index() + turn.quarters())
    }
}

impl Turn {
    /// Order a right-hand wall follower tries.
    pub const RIGHT_HAND: [Turn; 3] = [Turn::Right, Turn::Forward, Turn::Left];
    /// Order a left-hand wall follower tries.
    pub const LEFT_HAND: [Turn; 3] = [Turn::Left, Turn::Forward, Turn::Right];

    /// Clockwise quarter turns, i.e. steps along [`Heading::CROSS_ORDER`].
    pub fn quarters(self) -> usize {
        match self {
            Turn::Forward => 0,
            Turn::Right => 1,
            Turn::Back => 2,
            Turn::Left => 3,
        }
    }
}

/// For each incoming heading (indexed like [`Heading::CROSS_ORDER`]) the absolute headings in
/// the given relative preference order.
pub fn rotation_table(preference: [Turn; 3]) -> [[Heading; 3]; 4] {
    Heading::CROSS_ORDER.map(|incoming| preference.map(|turn| incoming.turn(turn)))
}
