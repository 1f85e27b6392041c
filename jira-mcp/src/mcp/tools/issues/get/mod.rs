//! Issue retrieval tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetIssueRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for fetching one issue by key
#[derive(Default)]
pub struct GetIssueTool;

impl GetIssueTool {
    /// Creates a new instance of the GetIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "getIssue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<GetIssueRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: GetIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::debug!(issue_key = %request.issue_key, "Fetching issue");

        context
            .client
            .get_issue(
                &request.issue_key,
                request.fields.as_deref(),
                request.expand.as_deref(),
            )
            .await
    }
}
