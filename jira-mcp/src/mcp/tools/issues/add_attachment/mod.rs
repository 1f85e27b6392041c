//! Attachment upload tool for MCP operations

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::shared_utils::decode_base64;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::AddAttachmentRequest;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Tool for attaching a base64-encoded file to an issue
#[derive(Default)]
pub struct AddAttachmentTool;

impl AddAttachmentTool {
    /// Creates a new instance of the AddAttachmentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddAttachmentTool {
    fn name(&self) -> &'static str {
        "addAttachment"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<AddAttachmentRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: AddAttachmentRequest = BaseToolImpl::parse_arguments(arguments)?;
        let content = decode_base64(&request.content_base64)?;

        tracing::debug!(
            issue_key = %request.issue_key,
            filename = %request.filename,
            bytes = content.len(),
            "Uploading attachment"
        );

        context
            .client
            .add_attachment(&request.issue_key, &request.filename, content)
            .await
    }
}
