//! Comment listing tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::IssueKeyRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for reading every comment on an issue
#[derive(Default)]
pub struct GetCommentsTool;

impl GetCommentsTool {
    /// Creates a new instance of the GetCommentsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetCommentsTool {
    fn name(&self) -> &'static str {
        "getComments"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<IssueKeyRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: IssueKeyRequest = BaseToolImpl::parse_arguments(arguments)?;
        let comments = context.client.get_comments(&request.issue_key).await?;
        Ok(Value::Array(comments))
    }
}
