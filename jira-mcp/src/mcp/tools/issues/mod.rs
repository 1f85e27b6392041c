//! Issue tools for MCP operations
//!
//! Lookup, creation, editing, search, workflow transitions and attachments.

pub mod add_attachment;
pub mod create;
pub mod get;
pub mod get_transitions;
pub mod search;
pub mod transition;
pub mod update;

use crate::error::Result;
use crate::mcp::tool_registry::ToolRegistry;

/// Register all issue-related tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) -> Result<()> {
    registry.register(get::GetIssueTool::new())?;
    registry.register(create::CreateIssueTool::new())?;
    registry.register(update::UpdateIssueTool::new())?;
    registry.register(search::SearchIssuesTool::new())?;
    registry.register(get_transitions::GetTransitionsTool::new())?;
    registry.register(transition::TransitionIssueTool::new())?;
    registry.register(add_attachment::AddAttachmentTool::new())?;
    Ok(())
}
