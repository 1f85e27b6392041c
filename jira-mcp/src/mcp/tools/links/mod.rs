//! Issue link tools for MCP operations

pub mod create;
pub mod list_types;

use crate::error::Result;
use crate::mcp::tool_registry::ToolRegistry;

/// Register all link-related tools with the registry
pub fn register_link_tools(registry: &mut ToolRegistry) -> Result<()> {
    registry.register(create::CreateIssueLinkTool::new())?;
    registry.register(list_types::GetIssueLinkTypesTool::new())?;
    Ok(())
}
