//! Grid coordinates and the four blast directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four axis-aligned directions a blast ray can travel.
///
/// Screen convention: `y` grows downward, so `Up` decrements `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order rays are fired from a bomb.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way along the same axis.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Bit this direction occupies in a [`FlameMask`](crate::FlameMask).
    ///
    /// Down = 8, Up = 4, Right = 2, Left = 1.
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Down => 1 << 3,
            Self::Up => 1 << 2,
            Self::Right => 1 << 1,
            Self::Left => 1,
        }
    }

    /// Unit offset `(dx, dy)` of a single step.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self {
            Self::Up => "^",
            Self::Down => "v",
            Self::Left => "<",
            Self::Right => ">",
        };
        f.write_str(arrow)
    }
}

/// Integer cell coordinate on the terrain grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring position one step away in `direction`.
    #[inline]
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Row-major ordering key, `(y, x)`.
    #[inline]
    pub const fn row_major_key(self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
