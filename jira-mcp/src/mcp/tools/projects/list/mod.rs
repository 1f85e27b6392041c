//! Project listing tool for MCP operations
//!
//! Jira returns every visible project in one response; the list is cut to
//! `limit` entries here.

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetProjectsRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for listing accessible projects
#[derive(Default)]
pub struct GetProjectsTool;

impl GetProjectsTool {
    /// Creates a new instance of the GetProjectsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetProjectsTool {
    fn name(&self) -> &'static str {
        "getProjects"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<GetProjectsRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: GetProjectsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let mut projects = context.client.get_projects().await?;
        projects.truncate(request.limit as usize);
        Ok(Value::Array(projects))
    }
}
