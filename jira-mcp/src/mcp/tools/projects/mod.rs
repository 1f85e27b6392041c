//! Project tools for MCP operations

pub mod get;
pub mod issue_types;
pub mod list;

use crate::error::Result;
use crate::mcp::tool_registry::ToolRegistry;

/// Register all project-related tools with the registry
pub fn register_project_tools(registry: &mut ToolRegistry) -> Result<()> {
    registry.register(list::GetProjectsTool::new())?;
    registry.register(get::GetProjectTool::new())?;
    registry.register(issue_types::GetIssueTypesTool::new())?;
    Ok(())
}
