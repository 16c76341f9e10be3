use blast_core::BlastError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - the error code passed across the FFI boundary
/// - `msg()` - the error message for diagnostics
pub(crate) trait FfiError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> BlastErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FfiError` for boundary failures that never
/// reach the core (null pointers, bad strings, poisoned locks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultBlastError {
    code: BlastErrorCode,
    msg: String,
}

impl DefaultBlastError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_terrain"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: BlastErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: BlastErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for an invalid parameter.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: BlastErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl FfiError for DefaultBlastError {
    fn code(&self) -> BlastErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// Core errors crossing the boundary, with the message rendered once.
#[derive(Debug)]
pub(crate) struct CoreBlastError {
    code: BlastErrorCode,
    msg: String,
}

impl From<BlastError> for CoreBlastError {
    fn from(error: BlastError) -> Self {
        let code = match &error {
            BlastError::OutOfBounds { .. } => BlastErrorCode::OutOfBounds,
            BlastError::NotABomb { .. } => BlastErrorCode::NotABomb,
            BlastError::InvalidRadius => BlastErrorCode::InvalidRadius,
            BlastError::MissingHeader(_)
            | BlastError::InvalidDimension { .. }
            | BlastError::UnknownGlyph { .. }
            | BlastError::RowTooLong { .. }
            | BlastError::TooManyRows { .. }
            | BlastError::CellCountMismatch { .. }
            | BlastError::Io(_) => BlastErrorCode::InvalidTerrain,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl FfiError for CoreBlastError {
    fn code(&self) -> BlastErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by blast functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlastErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Position lies outside the terrain.
    OutOfBounds = 3,

    /// Detonation requested on a cell without a bomb.
    NotABomb = 4,

    /// Blast radius must be positive.
    InvalidRadius = 5,

    /// Terrain text could not be parsed.
    InvalidTerrain = 6,

    /// Invalid parameter passed to function.
    InvalidParameter = 7,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The `CString` is stored here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, BlastErrorCode)> = const { RefCell::new((None, BlastErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, BlastErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, BlastErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// BlastUpdateC updates[64];
/// size_t count = 0;
/// if (blast_detonate(terrain, 3, 4, 3, true, updates, 64, &count) != Ok) {
///     printf("Detonation failed: %s\n", blast_get_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn blast_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
#[no_mangle]
pub extern "C" fn blast_get_last_error_code() -> BlastErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
