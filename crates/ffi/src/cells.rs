//! FFI-exposed cell types and per-cell access.

use blast_core::{BlastError, Cell, FlameMask, Position, Terrain};

use crate::error::{BlastErrorCode, CoreBlastError, DefaultBlastError};
use crate::helpers::{
    clear_last_error, handle_from_ptr, track_error, track_result, with_terrain, with_terrain_mut,
};
use crate::instance::BlastTerrain;

/// Kind of content held by a cell.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlastCellKind {
    Empty = 0,
    Wall = 1,
    Bomb = 2,
    /// Flame; the lit arms are in `BlastCellC::mask`.
    Flame = 3,
}

impl TryFrom<u8> for BlastCellKind {
    type Error = DefaultBlastError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Wall),
            2 => Ok(Self::Bomb),
            3 => Ok(Self::Flame),
            other => Err(DefaultBlastError::invalid_parameter(format!(
                "Unknown cell kind {other}"
            ))),
        }
    }
}

/// C-compatible cell.
///
/// `mask` is meaningful only for flames: Down = 8, Up = 4, Right = 2,
/// Left = 1. It is zero for every other kind.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlastCellC {
    pub kind: BlastCellKind,
    pub mask: u8,
}

impl From<Cell> for BlastCellC {
    fn from(cell: Cell) -> Self {
        let (kind, mask) = match cell {
            Cell::Empty => (BlastCellKind::Empty, 0),
            Cell::Wall => (BlastCellKind::Wall, 0),
            Cell::Bomb => (BlastCellKind::Bomb, 0),
            Cell::Flame(mask) => (BlastCellKind::Flame, mask.bits()),
        };
        Self { kind, mask }
    }
}

impl From<BlastCellC> for Cell {
    fn from(cell: BlastCellC) -> Self {
        match cell.kind {
            BlastCellKind::Empty => Cell::Empty,
            BlastCellKind::Wall => Cell::Wall,
            BlastCellKind::Bomb => Cell::Bomb,
            BlastCellKind::Flame => Cell::Flame(FlameMask::from_bits(cell.mask)),
        }
    }
}

/// Place content on one cell (host-side editing: walls, bombs).
///
/// `kind` is a `BlastCellKind` discriminant; `mask` is used for flames only.
///
/// Returns
/// - `BlastErrorCode::Ok` on success
/// - `BlastErrorCode::NullPointer` if `terrain` is null
/// - `BlastErrorCode::InvalidParameter` if `kind` is not a known discriminant
/// - `BlastErrorCode::OutOfBounds` if `(x, y)` is off the grid
///
/// # Safety
/// `terrain` must be null or a live handle from this library.
#[no_mangle]
pub unsafe extern "C" fn blast_terrain_set_cell(
    terrain: *const BlastTerrain,
    x: i32,
    y: i32,
    kind: u8,
    mask: u8,
) -> BlastErrorCode {
    let handle = match unsafe { handle_from_ptr(terrain, "terrain") } {
        Ok(handle) => handle,
        Err(code) => return code,
    };
    let kind = match track_result(BlastCellKind::try_from(kind)) {
        Ok(kind) => kind,
        Err(code) => return code,
    };
    let cell = Cell::from(BlastCellC { kind, mask });

    match with_terrain_mut(handle, |t| t.set(Position::new(x, y), cell)) {
        Ok(result) => match track_result(result.map_err(CoreBlastError::from)) {
            Ok(()) => BlastErrorCode::Ok,
            Err(code) => code,
        },
        Err(code) => code,
    }
}

/// Read one cell into `out_cell`.
///
/// Returns
/// - `BlastErrorCode::Ok` on success
/// - `BlastErrorCode::NullPointer` if `terrain` or `out_cell` is null
/// - `BlastErrorCode::OutOfBounds` if `(x, y)` is off the grid
///
/// # Safety
/// - `terrain` must be null or a live handle from this library.
/// - `out_cell` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn blast_terrain_get_cell(
    terrain: *const BlastTerrain,
    x: i32,
    y: i32,
    out_cell: *mut BlastCellC,
) -> BlastErrorCode {
    if out_cell.is_null() {
        return track_error(&DefaultBlastError::null_pointer("out_cell"));
    }
    let handle = match unsafe { handle_from_ptr(terrain, "terrain") } {
        Ok(handle) => handle,
        Err(code) => return code,
    };

    let position = Position::new(x, y);
    let lookup = match with_terrain(handle, |t| {
        t.get(position).ok_or(BlastError::OutOfBounds {
            position,
            width: t.width(),
            height: t.height(),
        })
    }) {
        Ok(lookup) => lookup,
        Err(code) => return code,
    };

    match track_result(lookup.map_err(CoreBlastError::from)) {
        Ok(cell) => {
            unsafe {
                *out_cell = cell.into();
            }
            BlastErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Reset every flame cell to empty; writes the number cleared to
/// `out_cleared` when it is non-null.
///
/// # Safety
/// - `terrain` must be null or a live handle from this library.
/// - `out_cleared` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn blast_terrain_clear_flames(
    terrain: *const BlastTerrain,
    out_cleared: *mut usize,
) -> BlastErrorCode {
    let handle = match unsafe { handle_from_ptr(terrain, "terrain") } {
        Ok(handle) => handle,
        Err(code) => return code,
    };

    match with_terrain_mut(handle, Terrain::clear_flames) {
        Ok(cleared) => {
            if !out_cleared.is_null() {
                unsafe {
                    *out_cleared = cleared;
                }
            }
            clear_last_error();
            BlastErrorCode::Ok
        }
        Err(code) => code,
    }
}
