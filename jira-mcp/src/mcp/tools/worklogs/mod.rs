//! Worklog (time tracking) tools for MCP operations

pub mod add;
pub mod list;

use crate::error::Result;
use crate::mcp::tool_registry::ToolRegistry;

/// Register all worklog-related tools with the registry
pub fn register_worklog_tools(registry: &mut ToolRegistry) -> Result<()> {
    registry.register(add::AddWorklogTool::new())?;
    registry.register(list::GetWorklogsTool::new())?;
    Ok(())
}
