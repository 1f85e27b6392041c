//! Comment tools for MCP operations

pub mod add;
pub mod list;

use crate::error::Result;
use crate::mcp::tool_registry::ToolRegistry;

/// Register all comment-related tools with the registry
pub fn register_comment_tools(registry: &mut ToolRegistry) -> Result<()> {
    registry.register(add::AddCommentTool::new())?;
    registry.register(list::GetCommentsTool::new())?;
    Ok(())
}
