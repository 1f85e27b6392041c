//! Model Context Protocol (MCP) server support
//!
//! This module provides the tool registry, the result envelope, the Jira tool
//! catalogue and the stdio/SSE transports.

// Module declarations
pub mod envelope;
pub mod schema;
pub mod server;
pub mod shared_utils;
mod stdio;
pub mod tool_registry;
pub mod tools;
pub mod types;


// Re-export commonly used items from submodules
pub use envelope::{run_enveloped, Envelope};
pub use schema::{request_schema, ArgumentSchema};
pub use server::McpServer;
pub use tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
pub use tools::register_all_tools;
