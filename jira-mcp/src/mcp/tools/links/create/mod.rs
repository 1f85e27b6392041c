//! Issue link creation tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateIssueLinkRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for linking two issues
#[derive(Default)]
pub struct CreateIssueLinkTool;

impl CreateIssueLinkTool {
    /// Creates a new instance of the CreateIssueLinkTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueLinkTool {
    fn name(&self) -> &'static str {
        "createIssueLink"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<CreateIssueLinkRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: CreateIssueLinkRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::debug!(
            link_type = %request.link_type,
            inward = %request.inward_issue,
            outward = %request.outward_issue,
            "Linking issues"
        );

        context
            .client
            .create_issue_link(
                &request.link_type,
                &request.inward_issue,
                &request.outward_issue,
                request.comment.as_deref(),
            )
            .await
    }
}
