//! Error handling for the jira-mcp CLI
//!
//! Errors keep their source chain and carry the exit code the process should
//! terminate with.

use crate::exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_SUCCESS};
use jira_mcp::{ErrorCategory, JiraMcpError};
use std::error::Error;
use std::fmt;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Create a CLI error from another error with a specific exit code
    pub fn from_error<E: Error + Send + Sync + 'static>(error: E, exit_code: i32) -> Self {
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// Wrap an `anyhow` error; its context chain becomes the source chain
    pub fn from_anyhow(error: anyhow::Error, exit_code: i32) -> Self {
        Self {
            message: error.to_string(),
            exit_code,
            source: error.source().map(|s| Box::new(ChainLink(s.to_string())) as _),
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<JiraMcpError> for CliError {
    fn from(error: JiraMcpError) -> Self {
        let exit_code = match error.category() {
            ErrorCategory::Configuration => EXIT_CONFIG,
            _ => EXIT_ERROR,
        };
        Self::from_error(error, exit_code)
    }
}

/// Flattened message of an `anyhow` cause
#[derive(Debug)]
struct ChainLink(String);

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ChainLink {}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}
