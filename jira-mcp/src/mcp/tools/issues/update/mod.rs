//! Issue update tool for MCP operations
//!
//! Text arguments count only when non-empty; `labels` counts whenever it is
//! supplied so that an empty list clears the labels. A call that contributes
//! no field at all is rejected before reaching Jira.

use crate::error::{JiraMcpError, Result};
use crate::mcp::schema::request_schema;
use crate::mcp::shared_utils::{decode_additional_fields, IssueFields};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::UpdateIssueRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for updating existing issues
#[derive(Default)]
pub struct UpdateIssueTool;

impl UpdateIssueTool {
    /// Creates a new instance of the UpdateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdateIssueTool {
    fn name(&self) -> &'static str {
        "updateIssue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<UpdateIssueRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: UpdateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let extra = decode_additional_fields(request.additional_fields.as_deref())?;

        let fields = IssueFields::new()
            .text("summary", request.summary.as_deref())
            .text("description", request.description.as_deref())
            .named("priority", request.priority.as_deref())
            .assignee(request.assignee.as_deref())
            .labels(request.labels, true)
            .extend(extra);

        if fields.is_empty() {
            return Err(JiraMcpError::invalid_input(
                "Nothing to update: at least one field must be provided",
            ));
        }

        let fields = fields.into_map();
        tracing::debug!(
            issue_key = %request.issue_key,
            fields = ?fields.keys().collect::<Vec<_>>(),
            "Updating issue"
        );

        context.client.update_issue(&request.issue_key, fields).await
    }
}
