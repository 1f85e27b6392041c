//! Worklog creation tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::AddWorklogRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for logging time against an issue
#[derive(Default)]
pub struct AddWorklogTool;

impl AddWorklogTool {
    /// Creates a new instance of the AddWorklogTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddWorklogTool {
    fn name(&self) -> &'static str {
        "addWorklog"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<AddWorklogRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: AddWorklogRequest = BaseToolImpl::parse_arguments(arguments)?;
        context
            .client
            .add_worklog(
                &request.issue_key,
                &request.time_spent,
                request.comment.as_deref(),
                request.started.as_deref(),
            )
            .await
    }
}
