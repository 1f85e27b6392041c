//! Exit code constants for the CLI
//!
//! - 0: Success, including shutdown on interrupt
//! - 1: Runtime failure (transport, bind)
//! - 2: Configuration failure

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// The server failed while running
pub const EXIT_ERROR: i32 = 1;

/// Configuration was missing or invalid
pub const EXIT_CONFIG: i32 = 2;
