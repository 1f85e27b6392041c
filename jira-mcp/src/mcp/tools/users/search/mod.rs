//! User search tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SearchUsersRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for finding users and their account ids
#[derive(Default)]
pub struct SearchUsersTool;

impl SearchUsersTool {
    /// Creates a new instance of the SearchUsersTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchUsersTool {
    fn name(&self) -> &'static str {
        "searchUsers"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<SearchUsersRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: SearchUsersRequest = BaseToolImpl::parse_arguments(arguments)?;
        let users = context
            .client
            .search_users(
                &request.query,
                0,
                request.max_results,
                request.include_inactive,
            )
            .await?;
        Ok(Value::Array(users))
    }
}
