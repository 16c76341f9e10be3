//! Bomb Blast Core Library
//!
//! Grid-based bomb detonation engine. Given a bomb on a terrain snapshot,
//! [`detonate`] computes every cell the blast changes: flames spreading along
//! four rays, walls knocked down, and further bombs set off in a chain
//! reaction. Crossing flames merge into box-drawing junctions (`─` + `│` = `┼`).
//!
//! The engine only reads the terrain. The host owns the grid and applies the
//! returned [`BlastUpdate`]:
//!
//! ```
//! use blast_core::{detonate, Cell, Position, Terrain};
//!
//! let mut terrain = Terrain::new(7, 7);
//! terrain.set(Position::new(3, 3), Cell::Bomb).unwrap();
//!
//! let update = detonate(Position::new(3, 3), &terrain).unwrap();
//! terrain.apply(&update).unwrap();
//! assert_eq!(terrain.get(Position::new(3, 3)).unwrap().glyph(), '┼');
//! ```

// Core types and utilities
pub mod core_types;

pub mod detonation;
pub mod error;
pub mod grid;

// Re-export core types
pub use core_types::{Cell, Direction, FlameMask, Position, FLAME_GLYPHS};

// Re-export engine and host types
pub use detonation::{detonate, detonate_with, BlastConfig, BlastEntry, BlastUpdate};
pub use error::BlastError;
pub use grid::{Terrain, MAX_TERRAIN_CELLS};
