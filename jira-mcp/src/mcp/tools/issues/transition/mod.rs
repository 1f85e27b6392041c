//! Issue transition tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::shared_utils::decode_additional_fields;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::TransitionIssueRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for moving an issue to another status
#[derive(Default)]
pub struct TransitionIssueTool;

impl TransitionIssueTool {
    /// Creates a new instance of the TransitionIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for TransitionIssueTool {
    fn name(&self) -> &'static str {
        "transitionIssue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<TransitionIssueRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: TransitionIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let fields = decode_additional_fields(request.additional_fields.as_deref())?;

        tracing::debug!(
            issue_key = %request.issue_key,
            transition_id = %request.transition_id,
            "Transitioning issue"
        );

        context
            .client
            .transition_issue(
                &request.issue_key,
                &request.transition_id,
                fields,
                request.comment.as_deref(),
            )
            .await
    }
}
