//! Issue creation tool for MCP operations
//!
//! Only the optional arguments that carry a value contribute a field: an empty
//! priority, assignee or label list is left out of the request entirely.

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::shared_utils::{decode_additional_fields, IssueFields};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateIssueRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for creating new issues
#[derive(Default)]
pub struct CreateIssueTool;

impl CreateIssueTool {
    /// Creates a new instance of the CreateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "createIssue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<CreateIssueRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: CreateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let extra = decode_additional_fields(request.additional_fields.as_deref())?;

        let fields = IssueFields::new()
            .named("priority", request.priority.as_deref())
            .assignee(request.assignee.as_deref())
            .labels(request.labels, false)
            .extend(extra);
        let fields = (!fields.is_empty()).then(|| fields.into_map());

        tracing::debug!(project = %request.project, issue_type = %request.issue_type, "Creating issue");

        let created = context
            .client
            .create_issue(
                &request.project,
                &request.summary,
                &request.description,
                &request.issue_type,
                fields,
            )
            .await?;

        tracing::info!(key = ?created.get("key"), "Created issue");
        Ok(created)
    }
}
