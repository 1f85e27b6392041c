//! JQL search tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SearchIssuesRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for searching issues with JQL
#[derive(Default)]
pub struct SearchIssuesTool;

impl SearchIssuesTool {
    /// Creates a new instance of the SearchIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchIssuesTool {
    fn name(&self) -> &'static str {
        "searchIssues"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<SearchIssuesRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: SearchIssuesRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::debug!(jql = %request.jql, max_results = request.max_results, "Searching issues");

        context
            .client
            .search_issues(
                &request.jql,
                request.max_results,
                request.fields.as_deref(),
                request.expand.as_deref(),
            )
            .await
    }
}
