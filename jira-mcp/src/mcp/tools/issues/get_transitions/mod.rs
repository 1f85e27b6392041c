//! Available-transitions tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::IssueKeyRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for listing the transitions an issue can take
#[derive(Default)]
pub struct GetTransitionsTool;

impl GetTransitionsTool {
    /// Creates a new instance of the GetTransitionsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetTransitionsTool {
    fn name(&self) -> &'static str {
        "getTransitions"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<IssueKeyRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: IssueKeyRequest = BaseToolImpl::parse_arguments(arguments)?;
        let transitions = context.client.get_transitions(&request.issue_key).await?;
        Ok(Value::Array(transitions))
    }
}
