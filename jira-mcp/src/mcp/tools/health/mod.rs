//! Health check tool for MCP operations
//!
//! Reports the loaded configuration and, when asked, the result of a Jira
//! server-info check. The check never fails the call: an unreachable Jira is
//! reported inside the `connectivity` object.

use crate::error::Result;
use crate::mcp::schema::request_schema;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::HealthRequest;
use async_trait::async_trait;
use serde_json::{json, Map, Value};

/// Tool for checking configuration and connectivity
#[derive(Default)]
pub struct HealthTool;

impl HealthTool {
    /// Creates a new instance of the HealthTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for HealthTool {
    fn name(&self) -> &'static str {
        "health"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> Value {
        request_schema::<HealthRequest>()
    }

    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value> {
        let request: HealthRequest = BaseToolImpl::parse_arguments(arguments)?;
        let config = &context.config;

        let config_status = json!({
            "jira_url": config.base_url,
            "jira_email": config.email,
            "api_token_configured": !config.api_token.is_empty(),
            "default_project": config.default_project,
        });

        let connectivity = if request.check_connectivity {
            context.client.health_check().await
        } else {
            json!("not_checked")
        };

        Ok(json!({
            "config": config_status,
            "connectivity": connectivity,
        }))
    }
}
