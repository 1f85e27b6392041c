//! Issue link type listing tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{McpTool, ToolContext};
use crate::mcp::types::EmptyRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for listing the link types configured on the site
#[derive(Default)]
pub struct GetIssueLinkTypesTool;

impl GetIssueLinkTypesTool {
    /// Creates a new instance of the GetIssueLinkTypesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueLinkTypesTool {
    fn name(&self) -> &'static str {
        "getIssueLinkTypes"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<EmptyRequest>()
    }

    async fn execute(&self, _arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let link_types = context.client.get_issue_link_types().await?;
        Ok(Value::Array(link_types))
    }
}
