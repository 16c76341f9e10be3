//! Flame direction masks and their box-drawing glyphs.
//!
//! A flame cell is described by which of its four arms are lit. Each arm is
//! one bit of a nibble (Down = 8, Up = 4, Right = 2, Left = 1), so two flames
//! crossing the same cell combine with a plain bitwise OR. The nibble indexes
//! straight into [`FLAME_GLYPHS`], which any renderer must reproduce exactly.

use crate::core_types::position::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Glyph for every 4-bit flame mask, indexed by the mask value.
pub const FLAME_GLYPHS: [char; 16] = [
    ' ', // 0b0000
    '╴', // 0b0001 left
    '╶', // 0b0010 right
    '─', // 0b0011 left + right
    '╵', // 0b0100 up
    '┘', // 0b0101 up + left
    '└', // 0b0110 up + right
    '┴', // 0b0111 up + left + right
    '╷', // 0b1000 down
    '┐', // 0b1001 down + left
    '┌', // 0b1010 down + right
    '┬', // 0b1011 down + left + right
    '│', // 0b1100 down + up
    '┤', // 0b1101 down + up + left
    '├', // 0b1110 down + up + right
    '┼', // 0b1111 all four
];

/// Set of lit arms on a flame cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct FlameMask(u8);

impl FlameMask {
    /// No arms lit. Renders as blank.
    pub const EMPTY: Self = Self(0);
    /// All four arms lit (`┼`).
    pub const FULL: Self = Self(0b1111);

    /// Build a mask from raw bits; anything above the low nibble is dropped.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Mask with a single arm lit.
    #[inline]
    pub const fn from_direction(direction: Direction) -> Self {
        Self(direction.bit())
    }

    /// Mask with both arms of `direction`'s axis lit (`─` or `│`).
    #[inline]
    pub const fn axis(direction: Direction) -> Self {
        Self(direction.bit() | direction.opposite().bit())
    }

    #[inline]
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    #[inline]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Box-drawing glyph for this mask.
    #[inline]
    pub const fn glyph(self) -> char {
        FLAME_GLYPHS[self.0 as usize]
    }

    /// Inverse of [`FlameMask::glyph`]. The blank glyph maps to `None`
    /// because a bare space is an empty cell, not a flame.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        FLAME_GLYPHS
            .iter()
            .position(|&g| g == glyph)
            .filter(|&bits| bits != 0)
            .map(|bits| Self(bits as u8))
    }
}

impl BitOr for FlameMask {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FlameMask {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for FlameMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
