//! Detonation entry point for host engines.

use blast_core::{detonate_with, BlastConfig, BlastError, BlastUpdate, Position};

use crate::cells::BlastCellC;
use crate::error::{BlastErrorCode, CoreBlastError, DefaultBlastError};
use crate::helpers::{handle_from_ptr, track_error, track_result, with_terrain, with_terrain_mut};
use crate::instance::BlastTerrain;

/// One changed cell of a detonation.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlastUpdateC {
    pub x: i32,
    pub y: i32,
    pub cell: BlastCellC,
}

/// Detonate the bomb at `(x, y)` and every bomb its blast chains into.
///
/// Up to `capacity` changed cells are written to `out_updates`, sorted by row
/// then column. `out_count` always receives the total number of changes, so
/// calling with `capacity = 0` and a null `out_updates` sizes the buffer.
/// When `apply` is true the changes are also written into the terrain.
///
/// Returns
/// - `BlastErrorCode::Ok` on success
/// - `BlastErrorCode::NullPointer` if `terrain` or `out_count` is null, or
///   `out_updates` is null with a non-zero `capacity`
/// - `BlastErrorCode::InvalidRadius` if `radius` is zero
/// - `BlastErrorCode::OutOfBounds` / `BlastErrorCode::NotABomb` for a bad origin
///
/// # Safety
/// - `terrain` must be null or a live handle from this library.
/// - `out_updates` must be null or valid for `capacity` writes.
/// - `out_count` must be null or valid for writes.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn blast_detonate(
    terrain: *const BlastTerrain,
    x: i32,
    y: i32,
    radius: u32,
    apply: bool,
    out_updates: *mut BlastUpdateC,
    capacity: usize,
    out_count: *mut usize,
) -> BlastErrorCode {
    if out_count.is_null() {
        return track_error(&DefaultBlastError::null_pointer("out_count"));
    }
    if out_updates.is_null() && capacity > 0 {
        return track_error(&DefaultBlastError::null_pointer("out_updates"));
    }
    let handle = match unsafe { handle_from_ptr(terrain, "terrain") } {
        Ok(handle) => handle,
        Err(code) => return code,
    };

    let origin = Position::new(x, y);
    let config = BlastConfig::with_radius(radius);
    let outcome = if apply {
        with_terrain_mut(handle, |t| -> Result<BlastUpdate, BlastError> {
            let update = detonate_with(origin, t, &config)?;
            t.apply(&update)?;
            Ok(update)
        })
    } else {
        with_terrain(handle, |t| detonate_with(origin, t, &config))
    };

    let update: BlastUpdate = match outcome {
        Ok(result) => match track_result(result.map_err(CoreBlastError::from)) {
            Ok(update) => update,
            Err(code) => return code,
        },
        Err(code) => return code,
    };

    let entries = update.sorted();
    for (i, entry) in entries.iter().take(capacity).enumerate() {
        // SAFETY: `i < capacity` and the caller guarantees room for `capacity` entries.
        unsafe {
            *out_updates.add(i) = BlastUpdateC {
                x: entry.position.x,
                y: entry.position.y,
                cell: entry.cell.into(),
            };
        }
    }
    unsafe {
        *out_count = entries.len();
    }

    BlastErrorCode::Ok
}
