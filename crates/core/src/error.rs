//! Error type shared by the detonation engine and the terrain model.

use crate::core_types::{Cell, Position};
use thiserror::Error;

/// Failures reported by [`detonate`](crate::detonate) and [`Terrain`](crate::Terrain) parsing.
///
/// Walls, grid edges, radius exhaustion and cyclic bomb chains are ordinary
/// propagation outcomes and never surface here.
#[derive(Debug, Error)]
pub enum BlastError {
    /// The position lies outside the terrain.
    #[error("position {position} is outside the {width}x{height} terrain")]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },

    /// Detonation was requested on a cell that holds no bomb.
    #[error("no bomb at {position} (found {found:?})")]
    NotABomb { position: Position, found: Cell },

    /// Blast radius must be at least one cell.
    #[error("blast radius must be positive")]
    InvalidRadius,

    /// Terrain text is missing its width or height line.
    #[error("terrain header is missing the {0} line")]
    MissingHeader(&'static str),

    /// Terrain width or height line is not a valid dimension.
    #[error("invalid terrain {name} {value:?}")]
    InvalidDimension { name: &'static str, value: String },

    /// Terrain text contains a glyph that maps to no cell.
    #[error("unknown glyph {glyph:?} at {position}")]
    UnknownGlyph { glyph: char, position: Position },

    /// A terrain row holds more cells than the declared width.
    #[error("row {row} has {len} cells but the terrain is {width} wide")]
    RowTooLong { row: usize, len: usize, width: usize },

    /// Terrain text holds more rows than the declared height.
    #[error("terrain has more than {height} rows")]
    TooManyRows { height: usize },

    /// Serialized terrain holds a cell list that does not fill its grid.
    #[error("terrain needs {expected} cells but {found} were given")]
    CellCountMismatch { expected: usize, found: usize },

    #[error("failed to read terrain: {0}")]
    Io(#[from] std::io::Error),
}
