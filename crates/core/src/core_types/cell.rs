//! Terrain cell contents.

use crate::core_types::flame::FlameMask;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Glyph for an empty cell.
pub const EMPTY_GLYPH: char = ' ';
/// Glyph for a destructible wall.
pub const WALL_GLYPH: char = '#';
/// Glyph for a bomb (Greek small omicron with tonos).
pub const BOMB_GLYPH: char = '\u{03CC}';

/// Contents of a single terrain cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Bomb,
    Flame(FlameMask),
}

impl Cell {
    /// Text glyph used in terrain files and console output.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => EMPTY_GLYPH,
            Self::Wall => WALL_GLYPH,
            Self::Bomb => BOMB_GLYPH,
            Self::Flame(mask) => mask.glyph(),
        }
    }

    /// Parse a terrain glyph. Unknown glyphs yield `None`.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            EMPTY_GLYPH => Some(Self::Empty),
            WALL_GLYPH => Some(Self::Wall),
            BOMB_GLYPH => Some(Self::Bomb),
            other => FlameMask::from_glyph(other).map(Self::Flame),
        }
    }

    /// Flame mask carried by this cell, if it is a flame.
    pub const fn flame_mask(self) -> Option<FlameMask> {
        match self {
            Self::Flame(mask) => Some(mask),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }

    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    #[inline]
    pub const fn is_flame(self) -> bool {
        matches!(self, Self::Flame(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_round_trip_for_fixed_cells() {
        for cell in [Cell::Empty, Cell::Wall, Cell::Bomb, Cell::Flame(FlameMask::FULL)] {
            assert_eq!(Cell::from_glyph(cell.glyph()), Some(cell));
        }
    }

    #[test]
    fn test_blank_flame_renders_like_empty() {
        assert_eq!(Cell::Flame(FlameMask::EMPTY).glyph(), Cell::Empty.glyph());
        assert_eq!(Cell::from_glyph(' '), Some(Cell::Empty));
    }

    #[test]
    fn test_unknown_glyph_rejected() {
        assert_eq!(Cell::from_glyph('@'), None);
        assert_eq!(Cell::from_glyph('o'), None);
    }
}
