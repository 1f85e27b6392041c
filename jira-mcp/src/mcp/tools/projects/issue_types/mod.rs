//! Issue type listing tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetIssueTypesRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for listing issue types site-wide or per project
#[derive(Default)]
pub struct GetIssueTypesTool;

impl GetIssueTypesTool {
    /// Creates a new instance of the GetIssueTypesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueTypesTool {
    fn name(&self) -> &'static str {
        "getIssueTypes"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<GetIssueTypesRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: GetIssueTypesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let types = context
            .client
            .get_issue_types(request.project_key.as_deref())
            .await?;
        Ok(Value::Array(types))
    }
}
