//! # jira-mcp
//!
//! Exposes Jira issue-tracking operations as a catalogue of schema-validated
//! Model Context Protocol tools.
//!
//! ## Features
//!
//! - **Tool Registry**: a fixed catalogue of named tools, each with a typed
//!   parameter schema that is enforced before the tool runs
//! - **Uniform Envelope**: every call answers `{success, data}` or
//!   `{success, error}`, whatever happened underneath
//! - **Two Transports**: stdio for local MCP clients, SSE over HTTP for
//!   networked ones
//! - **Jira Client**: a thin `reqwest` wrapper over the Jira REST API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jira_mcp::{JiraConfig, McpServer};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> jira_mcp::Result<()> {
//! let config = JiraConfig::from_env();
//! let server = McpServer::new(config)?;
//! server.serve_stdio(CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Shared helpers
pub mod common;

/// Server configuration
pub mod config;

/// Error types used throughout the library
pub mod error;

/// Jira REST client and the operation trait the tools call through
pub mod jira;

/// Model Context Protocol (MCP) tool registry, envelope and transports
pub mod mcp;

pub use config::JiraConfig;
pub use error::{ErrorCategory, JiraMcpError, Result};
pub use jira::{JiraClient, JiraOperations};
pub use mcp::{Envelope, McpServer, ToolContext, ToolRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
