use crate::error::{with_last_error_mut, BlastErrorCode, DefaultBlastError, FfiError};
use crate::instance::BlastTerrain;
use blast_core::Terrain;
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Accepts any type implementing `FfiError` trait.
pub(crate) fn set_last_error(error: &impl FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FfiError) -> BlastErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations so stale messages don't linger.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = BlastErrorCode::Ok;
    });
}

/// Record the outcome of a fallible operation: clears the last error on
/// success, stores it and returns its code on failure.
pub(crate) fn track_result<T, E: FfiError>(result: Result<T, E>) -> Result<T, BlastErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Borrow a handle from a raw pointer, recording a null-pointer error.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `blast_terrain_new` /
/// `blast_terrain_parse`.
pub(crate) unsafe fn handle_from_ptr<'a>(
    ptr: *const BlastTerrain,
    name: &str,
) -> Result<&'a BlastTerrain, BlastErrorCode> {
    // SAFETY: caller guarantees `ptr` is null or valid; null is checked by `as_ref`.
    unsafe { ptr.as_ref() }.ok_or_else(|| track_error(&DefaultBlastError::null_pointer(name)))
}

/// Run `func` with shared access to the handle's terrain.
pub(crate) fn with_terrain<F, T>(handle: &BlastTerrain, func: F) -> Result<T, BlastErrorCode>
where
    F: FnOnce(&Terrain) -> T,
{
    let terrain = handle
        .terrain
        .read()
        .map_err(|_| track_error(&DefaultBlastError::lock_poisoned("terrain")))?;
    Ok(func(&terrain))
}

/// Run `func` with exclusive access to the handle's terrain.
pub(crate) fn with_terrain_mut<F, T>(handle: &BlastTerrain, func: F) -> Result<T, BlastErrorCode>
where
    F: FnOnce(&mut Terrain) -> T,
{
    let mut terrain = handle
        .terrain
        .write()
        .map_err(|_| track_error(&DefaultBlastError::lock_poisoned("terrain")))?;
    Ok(func(&mut terrain))
}
