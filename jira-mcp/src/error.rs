//! Unified error handling for the jira-mcp library
//!
//! Faults are created as typed values where they happen and only turned into
//! the caller-visible string at the envelope boundary. The [`ErrorCategory`]
//! travels alongside for logging.

use std::fmt;
use thiserror::Error;

/// Maximum number of characters of a Jira response body kept in an error message
const MAX_BODY_EXCERPT: usize = 500;

/// The main error type for the jira-mcp library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JiraMcpError {
    /// Required configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied arguments failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Jira answered with a non-success status
    #[error("Jira API request {method} {path} failed with status {status}: {body}")]
    RemoteStatus {
        /// HTTP method of the failed request
        method: String,
        /// Request path relative to the Jira base URL
        path: String,
        /// HTTP status code returned by Jira
        status: u16,
        /// Excerpt of the response body
        body: String,
    },

    /// The request could not be sent or the response could not be read
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Jira answered with a body that is not valid JSON
    #[error("Jira returned an unreadable response for {path}: {source}")]
    MalformedResponse {
        /// Request path relative to the Jira base URL
        path: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool with this name is already registered
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// An MCP transport could not start or failed while serving
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal fault
    #[error("Internal error: {0}")]
    Internal(String),
}

impl JiraMcpError {
    /// Shorthand for an input validation error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Build a remote status error, trimming the body to a readable excerpt
    pub fn remote_status(method: &str, path: &str, status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let body = if trimmed.chars().count() > MAX_BODY_EXCERPT {
            let excerpt: String = trimmed.chars().take(MAX_BODY_EXCERPT).collect();
            format!("{excerpt}...")
        } else {
            trimmed.to_string()
        };
        Self::RemoteStatus {
            method: method.to_string(),
            path: path.to_string(),
            status,
            body,
        }
    }

    /// Which part of the taxonomy this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::InvalidInput(_) => ErrorCategory::InvalidInput,
            Self::RemoteStatus { .. } | Self::Http(_) | Self::MalformedResponse { .. } => {
                ErrorCategory::Remote
            }
            Self::UnknownTool(_) => ErrorCategory::Handling,
            Self::DuplicateTool(_)
            | Self::Transport(_)
            | Self::Json(_)
            | Self::Io(_)
            | Self::Internal(_) => ErrorCategory::Internal,
        }
    }
}

/// Coarse classification of a [`JiraMcpError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or invalid startup configuration
    Configuration,
    /// Bad caller input, no side effect happened
    InvalidInput,
    /// The Jira request failed
    Remote,
    /// The call could not be routed (e.g. unknown tool)
    Handling,
    /// Anything else
    Internal,
}

impl ErrorCategory {
    /// Stable label used in structured logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::InvalidInput => "invalid input",
            Self::Remote => "remote",
            Self::Handling => "handling",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, JiraMcpError>;
