//! Core value types: positions, directions, flame masks and cells

pub mod cell;
pub mod flame;
pub mod position;

pub use cell::{Cell, BOMB_GLYPH, EMPTY_GLYPH, WALL_GLYPH};
pub use flame::{FlameMask, FLAME_GLYPHS};
pub use position::{Direction, Position};
