//! Request types for MCP tools
//!
//! Each struct is both the advertised input schema of its tool (through
//! `schemars`) and the typed view of the arguments the tool body works with.
//! Field docs become parameter descriptions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_page_size() -> u32 {
    50
}

fn default_issue_type() -> String {
    "Task".to_string()
}

/// Request for tools that take no arguments
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct EmptyRequest {}

/// Request for the health tool
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct HealthRequest {
    /// If true, verify Jira connectivity by fetching server info
    #[serde(default = "default_true")]
    pub check_connectivity: bool,
}

/// Request carrying only an issue key
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct IssueKeyRequest {
    /// Issue key (e.g., PROJ-123)
    pub issue_key: String,
}

/// Request to fetch one issue
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetIssueRequest {
    /// Issue key (e.g., PROJ-123)
    pub issue_key: String,
    /// Comma-separated list of fields to return
    pub fields: Option<String>,
    /// Comma-separated list of parameters to expand
    pub expand: Option<String>,
}

/// Request to create an issue
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateIssueRequest {
    /// Project key (e.g., PROJ)
    pub project: String,
    /// Issue summary/title
    pub summary: String,
    /// Issue description
    pub description: String,
    /// Issue type (e.g., Task, Bug, Story)
    #[serde(default = "default_issue_type")]
    pub issue_type: String,
    /// Priority name (e.g., High, Medium, Low)
    pub priority: Option<String>,
    /// Assignee account ID or username
    pub assignee: Option<String>,
    /// List of labels
    pub labels: Option<Vec<String>>,
    /// JSON string of additional fields
    pub additional_fields: Option<String>,
}

/// Request to update an issue
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UpdateIssueRequest {
    /// Issue key (e.g., PROJ-123)
    pub issue_key: String,
    /// New summary/title
    pub summary: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New priority name
    pub priority: Option<String>,
    /// New assignee account ID or username
    pub assignee: Option<String>,
    /// New list of labels (replaces existing)
    pub labels: Option<Vec<String>>,
    /// JSON string of additional fields to update
    pub additional_fields: Option<String>,
}

/// Request to run a JQL search
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SearchIssuesRequest {
    /// JQL query string (e.g., 'project = PROJ AND status = Open')
    pub jql: String,
    /// Maximum number of issues to return
    #[serde(default = "default_page_size")]
    #[schemars(range(min = 1, max = 100))]
    pub max_results: u32,
    /// Comma-separated list of fields to return
    pub fields: Option<String>,
    /// Comma-separated list of parameters to expand
    pub expand: Option<String>,
}

/// Request to transition an issue
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct TransitionIssueRequest {
    /// Issue key (e.g., PROJ-123)
    pub issue_key: String,
    /// Transition ID (get from getTransitions)
    pub transition_id: String,
    /// Optional comment to add with transition
    pub comment: Option<String>,
    /// JSON string of additional fields required by transition
    pub additional_fields: Option<String>,
}

/// Request to comment on an issue
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddCommentRequest {
    /// Issue key (e.g., PROJ-123)
    pub issue_key: String,
    /// Comment text to add
    pub comment: String,
}

/// Request to attach a file
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddAttachmentRequest {
    /// Issue key (e.g., PROJ-123)
    pub issue_key: String,
    /// Name of the file to attach
    pub filename: String,
    /// Base64-encoded file content
    pub content_base64: String,
}

/// Request to list projects
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetProjectsRequest {
    /// Maximum number of projects to return
    #[serde(default = "default_page_size")]
    #[schemars(range(min = 1, max = 100))]
    pub limit: u32,
}

/// Request carrying only a project key
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ProjectKeyRequest {
    /// Project key (e.g., PROJ)
    pub project_key: String,
}

/// Request for issue types
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetIssueTypesRequest {
    /// Project key to get issue types for (optional)
    pub project_key: Option<String>,
}

/// Request to search users
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SearchUsersRequest {
    /// Search query (email, username, or display name)
    pub query: String,
    /// Maximum number of users to return
    #[serde(default = "default_page_size")]
    #[schemars(range(min = 1, max = 100))]
    pub max_results: u32,
    /// Include inactive users in results
    #[serde(default)]
    pub include_inactive: bool,
}

/// Request to log work
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddWorklogRequest {
    /// Issue key (e.g., PROJ-123)
    pub issue_key: String,
    /// Time spent (e.g., '3h 30m', '2d 4h', '1w 2d')
    pub time_spent: String,
    /// Optional worklog comment
    pub comment: Option<String>,
    /// When work started (ISO 8601 format, e.g., '2024-01-15T09:00:00.000+0000')
    pub started: Option<String>,
}

/// Request to link two issues
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateIssueLinkRequest {
    /// Link type name (e.g., 'Blocks', 'Relates')
    pub link_type: String,
    /// Inward issue key (e.g., PROJ-123)
    pub inward_issue: String,
    /// Outward issue key (e.g., PROJ-456)
    pub outward_issue: String,
    /// Optional comment for the link
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::schema::request_schema;
    use serde_json::json;

    #[test]
    fn test_search_schema_carries_bounds_and_default() {
        let schema = request_schema::<SearchIssuesRequest>();
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["required"], json!(["jql"]));

        let max_results = &schema["properties"]["max_results"];
        assert_eq!(max_results["type"], json!("integer"));
        assert_eq!(max_results["minimum"].as_f64(), Some(1.0));
        assert_eq!(max_results["maximum"].as_f64(), Some(100.0));
        assert_eq!(max_results["default"], json!(50));
        assert_eq!(
            max_results["description"],
            json!("Maximum number of issues to return")
        );
    }

    #[test]
    fn test_optional_fields_are_not_required() {
        let schema = request_schema::<CreateIssueRequest>();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required.len(), 3);
        for name in ["project", "summary", "description"] {
            assert!(required.contains(&name), "{name} should be required");
        }
        assert_eq!(schema["properties"]["issue_type"]["default"], json!("Task"));
        assert_eq!(
            schema["properties"]["labels"]["items"]["type"],
            json!("string")
        );
    }

    #[test]
    fn test_empty_request_has_no_properties() {
        let schema = request_schema::<EmptyRequest>();
        assert_eq!(schema["type"], json!("object"));
        assert!(schema["properties"]
            .as_object()
            .map_or(true, |p| p.is_empty()));
    }
}
