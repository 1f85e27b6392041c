//! Recording implementation of [`JiraOperations`] for tests
//!
//! `MockJiraClient` never touches the network. Every call is appended to a
//! shared log together with the arguments it was given, and answered from a
//! table of canned responses or failures keyed by operation name.
//!
//! # Usage
//!
//! ```ignore
//! use jira_mcp::jira::mock_client::MockJiraClient;
//! use jira_mcp::JiraOperations;
//! use serde_json::json;
//!
//! let mock = MockJiraClient::new()
//!     .with_response("get_issue", json!({ "key": "PROJ-1" }))
//!     .with_failure("add_comment", 403, "Forbidden");
//!
//! let issue = mock.get_issue("PROJ-1", None, None).await?;
//! assert_eq!(mock.calls_for("get_issue").await.len(), 1);
//! ```

use super::payload::expect_list;
use super::JiraOperations;
use crate::error::{JiraMcpError, Result};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Trait method name, e.g. `create_issue`
    pub operation: String,
    /// Arguments the method received
    pub arguments: Value,
}

/// Simulated non-success answer from Jira
#[derive(Debug, Clone)]
struct CannedFailure {
    status: u16,
    body: String,
}

/// In-memory [`JiraOperations`] that records every call
#[derive(Debug, Clone, Default)]
pub struct MockJiraClient {
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    responses: HashMap<String, Value>,
    failures: HashMap<String, CannedFailure>,
}

impl MockJiraClient {
    /// Mock that answers every operation with its default response
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `operation` with `response`.
    ///
    /// List operations expect a JSON array; any other shape yields an empty list.
    pub fn with_response(mut self, operation: &str, response: Value) -> Self {
        self.responses.insert(operation.to_string(), response);
        self
    }

    /// Fail `operation` as if Jira had answered with `status`
    pub fn with_failure(mut self, operation: &str, status: u16, body: &str) -> Self {
        self.failures.insert(
            operation.to_string(),
            CannedFailure {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    /// Every call made so far, oldest first
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Calls made to one operation
    pub async fn calls_for(&self, operation: &str) -> Vec<RecordedCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|call| call.operation == operation)
            .cloned()
            .collect()
    }

    /// Total number of calls made
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    async fn record(&self, operation: &str, arguments: Value, default: Value) -> Result<Value> {
        self.calls.write().await.push(RecordedCall {
            operation: operation.to_string(),
            arguments,
        });

        if let Some(failure) = self.failures.get(operation) {
            return Err(JiraMcpError::remote_status(
                "MOCK",
                operation,
                failure.status,
                &failure.body,
            ));
        }

        Ok(self.responses.get(operation).cloned().unwrap_or(default))
    }

    async fn record_list(&self, operation: &str, arguments: Value) -> Result<Vec<Value>> {
        let response = self.record(operation, arguments, json!([])).await?;
        Ok(expect_list(response))
    }
}

#[async_trait]
impl JiraOperations for MockJiraClient {
    async fn get_issue(
        &self,
        issue_key: &str,
        fields: Option<&str>,
        expand: Option<&str>,
    ) -> Result<Value> {
        self.record(
            "get_issue",
            json!({ "issue_key": issue_key, "fields": fields, "expand": expand }),
            json!({ "key": issue_key, "fields": {} }),
        )
        .await
    }

    async fn create_issue(
        &self,
        project: &str,
        summary: &str,
        description: &str,
        issue_type: &str,
        fields: Option<Map<String, Value>>,
    ) -> Result<Value> {
        self.record(
            "create_issue",
            json!({
                "project": project,
                "summary": summary,
                "description": description,
                "issue_type": issue_type,
                "fields": fields,
            }),
            json!({ "id": "10000", "key": format!("{project}-1") }),
        )
        .await
    }

    async fn update_issue(&self, issue_key: &str, fields: Map<String, Value>) -> Result<Value> {
        self.record(
            "update_issue",
            json!({ "issue_key": issue_key, "fields": fields }),
            Value::Null,
        )
        .await
    }

    async fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
        fields: Option<&str>,
        expand: Option<&str>,
    ) -> Result<Value> {
        self.record(
            "search_issues",
            json!({
                "jql": jql,
                "max_results": max_results,
                "fields": fields,
                "expand": expand,
            }),
            json!({ "startAt": 0, "maxResults": max_results, "total": 0, "issues": [] }),
        )
        .await
    }

    async fn get_transitions(&self, issue_key: &str) -> Result<Vec<Value>> {
        self.record_list("get_transitions", json!({ "issue_key": issue_key }))
            .await
    }

    async fn transition_issue(
        &self,
        issue_key: &str,
        transition_id: &str,
        fields: Option<Map<String, Value>>,
        comment: Option<&str>,
    ) -> Result<Value> {
        self.record(
            "transition_issue",
            json!({
                "issue_key": issue_key,
                "transition_id": transition_id,
                "fields": fields,
                "comment": comment,
            }),
            Value::Null,
        )
        .await
    }

    async fn add_comment(&self, issue_key: &str, comment: &str) -> Result<Value> {
        self.record(
            "add_comment",
            json!({ "issue_key": issue_key, "comment": comment }),
            json!({ "id": "10100", "body": comment }),
        )
        .await
    }

    async fn get_comments(&self, issue_key: &str) -> Result<Vec<Value>> {
        self.record_list("get_comments", json!({ "issue_key": issue_key }))
            .await
    }

    async fn add_attachment(
        &self,
        issue_key: &str,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<Value> {
        self.record(
            "add_attachment",
            json!({
                "issue_key": issue_key,
                "filename": filename,
                "size": content.len(),
                "content": String::from_utf8_lossy(&content),
            }),
            json!([{ "filename": filename, "size": content.len() }]),
        )
        .await
    }

    async fn get_projects(&self) -> Result<Vec<Value>> {
        self.record_list("get_projects", json!({})).await
    }

    async fn get_project(&self, project_key: &str) -> Result<Value> {
        self.record(
            "get_project",
            json!({ "project_key": project_key }),
            json!({ "key": project_key }),
        )
        .await
    }

    async fn get_issue_types(&self, project_key: Option<&str>) -> Result<Vec<Value>> {
        self.record_list("get_issue_types", json!({ "project_key": project_key }))
            .await
    }

    async fn search_users(
        &self,
        query: &str,
        start: u32,
        limit: u32,
        include_inactive: bool,
    ) -> Result<Vec<Value>> {
        self.record_list(
            "search_users",
            json!({
                "query": query,
                "start": start,
                "limit": limit,
                "include_inactive": include_inactive,
            }),
        )
        .await
    }

    async fn add_worklog(
        &self,
        issue_key: &str,
        time_spent: &str,
        comment: Option<&str>,
        started: Option<&str>,
    ) -> Result<Value> {
        self.record(
            "add_worklog",
            json!({
                "issue_key": issue_key,
                "time_spent": time_spent,
                "comment": comment,
                "started": started,
            }),
            json!({ "id": "10200", "timeSpent": time_spent }),
        )
        .await
    }

    async fn get_worklogs(&self, issue_key: &str) -> Result<Vec<Value>> {
        self.record_list("get_worklogs", json!({ "issue_key": issue_key }))
            .await
    }

    async fn create_issue_link(
        &self,
        link_type: &str,
        inward_issue: &str,
        outward_issue: &str,
        comment: Option<&str>,
    ) -> Result<Value> {
        self.record(
            "create_issue_link",
            json!({
                "link_type": link_type,
                "inward_issue": inward_issue,
                "outward_issue": outward_issue,
                "comment": comment,
            }),
            Value::Null,
        )
        .await
    }

    async fn get_issue_link_types(&self) -> Result<Vec<Value>> {
        self.record_list("get_issue_link_types", json!({})).await
    }

    async fn health_check(&self) -> Value {
        match self
            .record(
                "health_check",
                json!({}),
                json!({ "status": "ok", "server_info": {} }),
            )
            .await
        {
            Ok(value) => value,
            Err(e) => json!({ "status": "error", "error": e.to_string() }),
        }
    }
}
