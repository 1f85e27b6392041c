//! MCP tool catalogue
//!
//! Each tool lives in its own submodule with its implementation and a
//! `description.md` shown to MCP clients. Tools are grouped by the part of
//! Jira they touch.

pub mod comments;
pub mod health;
pub mod issues;
pub mod links;
pub mod projects;
pub mod users;
pub mod worklogs;

use crate::error::Result;
use crate::mcp::tool_registry::ToolRegistry;

/// Register the complete catalogue
pub fn register_all_tools(registry: &mut ToolRegistry) -> Result<()> {
    registry.register(health::HealthTool::new())?;
    issues::register_issue_tools(registry)?;
    comments::register_comment_tools(registry)?;
    projects::register_project_tools(registry)?;
    users::register_user_tools(registry)?;
    worklogs::register_worklog_tools(registry)?;
    links::register_link_tools(registry)?;
    Ok(())
}

