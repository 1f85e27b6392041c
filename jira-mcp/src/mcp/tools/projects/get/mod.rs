//! Project detail tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::ProjectKeyRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for fetching one project
#[derive(Default)]
pub struct GetProjectTool;

impl GetProjectTool {
    /// Creates a new instance of the GetProjectTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetProjectTool {
    fn name(&self) -> &'static str {
        "getProject"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<ProjectKeyRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: ProjectKeyRequest = BaseToolImpl::parse_arguments(arguments)?;
        context.client.get_project(&request.project_key).await
    }
}
