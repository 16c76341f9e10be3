use blast_core::Terrain;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use std::sync::RwLock;

use crate::error::{BlastErrorCode, CoreBlastError, DefaultBlastError};
use crate::helpers::{track_error, track_result};

/// Terrain owned by the host engine, behind an opaque pointer.
///
/// # Thread Safety
/// The grid is protected by an `RwLock`: previews (`apply = false`) and cell
/// reads share the lock, while detonations that apply their result and cell
/// writes take it exclusively.
pub struct BlastTerrain {
    pub(crate) terrain: RwLock<Terrain>,
}

impl BlastTerrain {
    pub(crate) fn new(terrain: Terrain) -> Box<Self> {
        Box::new(Self {
            terrain: RwLock::new(terrain),
        })
    }
}

/// Hand a freshly built handle to the caller, or null it out on failure.
///
/// # Safety
/// `out_terrain` must be non-null and writable.
unsafe fn publish(
    result: Result<Box<BlastTerrain>, BlastErrorCode>,
    out_terrain: *mut *mut BlastTerrain,
) -> BlastErrorCode {
    match result {
        Ok(handle) => {
            unsafe {
                *out_terrain = Box::into_raw(handle);
            }
            BlastErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_terrain = ptr::null_mut();
            }
            code
        }
    }
}

/// Create an all-empty terrain of `width` x `height` cells.
///
/// Returns
/// - `BlastErrorCode::Ok` with a valid handle in `out_terrain`
/// - `BlastErrorCode::NullPointer` if `out_terrain` is null
/// - `BlastErrorCode::InvalidParameter` if either dimension is zero or the
///   grid is too large to address
///
/// # Safety
///
/// - `out_terrain` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned handle and MUST release it with
///   `blast_terrain_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn blast_terrain_new(
    width: usize,
    height: usize,
    out_terrain: *mut *mut BlastTerrain,
) -> BlastErrorCode {
    if out_terrain.is_null() {
        return track_error(&DefaultBlastError::null_pointer("out_terrain"));
    }

    let result = if width == 0 || height == 0 {
        Err(DefaultBlastError::invalid_parameter(format!(
            "Terrain dimensions must be positive, got {width}x{height}"
        )))
    } else {
        Terrain::try_new(width, height)
            .map(BlastTerrain::new)
            .map_err(|e| DefaultBlastError::invalid_parameter(e.to_string()))
    };

    unsafe { publish(track_result(result), out_terrain) }
}

/// Parse a terrain from its text form (width line, height line, rows).
///
/// Returns
/// - `BlastErrorCode::Ok` with a valid handle in `out_terrain`
/// - `BlastErrorCode::NullPointer` if `text` or `out_terrain` is null
/// - `BlastErrorCode::InvalidParameter` if `text` is not UTF-8
/// - `BlastErrorCode::InvalidTerrain` if the text is malformed
///
/// # Safety
///
/// - `text` must be a valid null-terminated string; it is only read.
/// - `out_terrain` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned handle and MUST release it with
///   `blast_terrain_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn blast_terrain_parse(
    text: *const c_char,
    out_terrain: *mut *mut BlastTerrain,
) -> BlastErrorCode {
    if out_terrain.is_null() {
        return track_error(&DefaultBlastError::null_pointer("out_terrain"));
    }
    if text.is_null() {
        unsafe {
            *out_terrain = ptr::null_mut();
        }
        return track_error(&DefaultBlastError::null_pointer("text"));
    }

    // SAFETY: caller guarantees a valid null-terminated string.
    let text = unsafe { CStr::from_ptr(text) };
    let result = match text.to_str() {
        Ok(text) => track_result(
            Terrain::parse(text)
                .map(BlastTerrain::new)
                .map_err(CoreBlastError::from),
        ),
        Err(e) => track_result::<Box<BlastTerrain>, _>(Err(DefaultBlastError::invalid_parameter(
            format!("Terrain text is not valid UTF-8: {e}"),
        ))),
    };

    unsafe { publish(result, out_terrain) }
}

/// Destroy a terrain created by `blast_terrain_new` or `blast_terrain_parse`.
///
/// Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by this library and not freed already.
/// - After calling this function the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn blast_terrain_destroy(ptr: *mut BlastTerrain) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `publish` and has not
    // been freed; null was checked above.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
