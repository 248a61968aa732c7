//! Helpers shared across operations

use crate::error::ErgoError;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Maps an operation result to an exit code, reporting errors on stderr
///
/// Lookup failures (unknown or duplicate services) exit with
/// `EXIT_FAILURE`; everything else exits with `EXIT_ERROR`.
pub(crate) fn finish(result: Result<(), ErgoError>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(&e)
        }
    }
}

pub(crate) fn exit_code(error: &ErgoError) -> i32 {
    match error {
        ErgoError::ServiceNotFound(_) | ErgoError::DuplicateService(_) => EXIT_FAILURE,
        _ => EXIT_ERROR,
    }
}
