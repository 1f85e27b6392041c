//! Jira REST access
//!
//! [`JiraOperations`] is the seam the MCP tools call through. [`JiraClient`]
//! implements it against a real Jira site; [`mock_client::MockJiraClient`]
//! records calls for tests.

pub mod client;
pub mod mock_client;
pub mod payload;

pub use client::JiraClient;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One method per Jira operation exposed through the tool catalogue.
///
/// Every call performs a single request and returns the parsed JSON response,
/// except [`JiraOperations::health_check`] which reports failures in its
/// return value instead of an error.
#[async_trait]
pub trait JiraOperations: Send + Sync {
    /// Fetch an issue by key
    async fn get_issue(
        &self,
        issue_key: &str,
        fields: Option<&str>,
        expand: Option<&str>,
    ) -> Result<Value>;

    /// Create an issue; `fields` is merged over the base fields
    async fn create_issue(
        &self,
        project: &str,
        summary: &str,
        description: &str,
        issue_type: &str,
        fields: Option<Map<String, Value>>,
    ) -> Result<Value>;

    /// Replace the given fields on an issue
    async fn update_issue(&self, issue_key: &str, fields: Map<String, Value>) -> Result<Value>;

    /// Run a JQL search
    async fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
        fields: Option<&str>,
        expand: Option<&str>,
    ) -> Result<Value>;

    /// Transitions currently available for an issue
    async fn get_transitions(&self, issue_key: &str) -> Result<Vec<Value>>;

    /// Move an issue through a transition, optionally setting fields and commenting
    async fn transition_issue(
        &self,
        issue_key: &str,
        transition_id: &str,
        fields: Option<Map<String, Value>>,
        comment: Option<&str>,
    ) -> Result<Value>;

    /// Add a plain-text comment
    async fn add_comment(&self, issue_key: &str, comment: &str) -> Result<Value>;

    /// All comments on an issue
    async fn get_comments(&self, issue_key: &str) -> Result<Vec<Value>>;

    /// Upload `content` as an attachment called `filename`
    async fn add_attachment(
        &self,
        issue_key: &str,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<Value>;

    /// All non-archived projects visible to the account
    async fn get_projects(&self) -> Result<Vec<Value>>;

    /// One project by key
    async fn get_project(&self, project_key: &str) -> Result<Value>;

    /// Issue types of a project, or every issue type when no project is given
    async fn get_issue_types(&self, project_key: Option<&str>) -> Result<Vec<Value>>;

    /// Find users by email, username or display name
    async fn search_users(
        &self,
        query: &str,
        start: u32,
        limit: u32,
        include_inactive: bool,
    ) -> Result<Vec<Value>>;

    /// Log time against an issue
    async fn add_worklog(
        &self,
        issue_key: &str,
        time_spent: &str,
        comment: Option<&str>,
        started: Option<&str>,
    ) -> Result<Value>;

    /// All worklog entries of an issue
    async fn get_worklogs(&self, issue_key: &str) -> Result<Vec<Value>>;

    /// Link two issues
    async fn create_issue_link(
        &self,
        link_type: &str,
        inward_issue: &str,
        outward_issue: &str,
        comment: Option<&str>,
    ) -> Result<Value>;

    /// Link types configured on the site
    async fn get_issue_link_types(&self) -> Result<Vec<Value>>;

    /// Lightweight server-info check; never fails.
    ///
    /// Returns `{"status": "ok", "server_info": ...}` or
    /// `{"status": "error", "error": "..."}`.
    async fn health_check(&self) -> Value;
}
