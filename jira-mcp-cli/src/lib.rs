//! jira-mcp CLI library
//!
//! Argument parsing, logging setup, error reporting and exit codes for the
//! `jira-mcp` binary.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// Error type carrying the process exit code
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Log subscriber setup
pub mod logging;
