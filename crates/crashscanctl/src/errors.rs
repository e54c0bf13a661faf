//! Exit codes for crashscanctl
//!
//! Configuration errors from the library use `ScanError::code()`.

use crashscan_common::ScanError;

/// No crash found in any input
pub const EXIT_SUCCESS: i32 = 0;

/// At least one input contained a crash (or suspicious output)
pub const EXIT_CRASH_FOUND: i32 = 1;

/// Anything else that went wrong (unreadable input, runtime failure)
pub const EXIT_GENERAL_ERROR: i32 = 2;

/// Map an error chain to a process exit code
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ScanError>())
        .map(ScanError::code)
        .unwrap_or(EXIT_GENERAL_ERROR)
}
