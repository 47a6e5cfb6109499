//! Exit codes for clarion-fence
//!
//! Scripts can use `clarion-fence classify` as a predicate: success means the input was
//! recognised as Clarion source.

/// Success - the command completed, or the input was recognised as Clarion
pub const SUCCESS: i32 = 0;

/// The input was not recognised as Clarion
pub const NOT_CLARION: i32 = 1;

/// Tool error - configuration error, file access error, or internal error
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::TOOL_ERROR;

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
