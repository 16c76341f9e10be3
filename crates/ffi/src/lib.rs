//! C ABI for embedding the blast engine in a host game engine.
//!
//! The host creates a [`BlastTerrain`] handle, edits cells, and calls
//! [`blast_detonate`]. Every function returns a [`BlastErrorCode`]; details of
//! the last failure on the calling thread are available from
//! [`blast_get_last_error`].

mod cells;
mod detonate;
mod error;
mod helpers;
mod instance;

pub use cells::{
    blast_terrain_clear_flames, blast_terrain_get_cell, blast_terrain_set_cell, BlastCellC,
    BlastCellKind,
};
pub use detonate::{blast_detonate, BlastUpdateC};
pub use error::{blast_get_last_error, blast_get_last_error_code, BlastErrorCode};
pub use instance::{blast_terrain_destroy, blast_terrain_new, blast_terrain_parse, BlastTerrain};
