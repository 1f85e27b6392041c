//! Comment creation tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::AddCommentRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for commenting on an issue
#[derive(Default)]
pub struct AddCommentTool;

impl AddCommentTool {
    /// Creates a new instance of the AddCommentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddCommentTool {
    fn name(&self) -> &'static str {
        "addComment"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<AddCommentRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: AddCommentRequest = BaseToolImpl::parse_arguments(arguments)?;
        context
            .client
            .add_comment(&request.issue_key, &request.comment)
            .await
    }
}
