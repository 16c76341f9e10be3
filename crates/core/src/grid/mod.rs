//! Terrain grid the host owns and the engine reads

pub mod terrain;

pub use terrain::{Terrain, MAX_TERRAIN_CELLS};
