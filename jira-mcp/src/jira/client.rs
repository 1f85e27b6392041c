//! `reqwest`-backed Jira REST client
//!
//! Each method performs exactly one request: no retries, no caching. Every
//! request carries basic auth (account email + API token) and is bounded by
//! the configured timeout.

use super::payload::{
    create_issue_fields, expect_list, extract_list, issue_link_payload, transition_payload,
    worklog_payload,
};
use super::JiraOperations;
use crate::config::JiraConfig;
use crate::error::{JiraMcpError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::{json, Map, Value};
use url::Url;

const REST_API_V2: [&str; 3] = ["rest", "api", "2"];
const REST_API_V3: [&str; 3] = ["rest", "api", "3"];
const AGILE_API: [&str; 3] = ["rest", "agile", "1.0"];

/// Query string pairs for a request
type Query<'a> = Vec<(&'a str, String)>;

/// Client for a single Jira site
#[derive(Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: Url,
    email: String,
    api_token: String,
}

impl JiraClient {
    /// Build a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when credentials are missing or the base
    /// URL does not parse, and an HTTP error if the TLS backend cannot start.
    pub fn new(config: &JiraConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&format!("{}/", config.base_url)).map_err(|e| {
            JiraMcpError::Config(format!("Invalid JIRA_URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(JiraMcpError::Config(format!(
                "Invalid JIRA_URL '{}': not a base URL",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("jira-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            email: config.email.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, prefix: &[&str], segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| JiraMcpError::Internal(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(prefix)
            .extend(segments);
        Ok(url)
    }

    fn api(&self, segments: &[&str]) -> Result<Url> {
        self.endpoint(&REST_API_V2, segments)
    }

    fn agile(&self, segments: &[&str]) -> Result<Url> {
        self.endpoint(&AGILE_API, segments)
    }

    async fn get(&self, url: Url, query: Query<'_>) -> Result<Value> {
        let builder = self.http.get(url.clone()).query(&query);
        self.send(Method::GET, &url, builder).await
    }

    async fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Value> {
        let builder = self.http.post(url.clone()).json(body);
        self.send(Method::POST, &url, builder).await
    }

    async fn put<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Value> {
        let builder = self.http.put(url.clone()).json(body);
        self.send(Method::PUT, &url, builder).await
    }

    async fn send(&self, method: Method, url: &Url, builder: RequestBuilder) -> Result<Value> {
        tracing::debug!(method = %method, path = url.path(), "Jira request");

        let response = builder
            .basic_auth(&self.email, Some(&self.api_token))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(JiraMcpError::remote_status(
                method.as_str(),
                url.path(),
                status.as_u16(),
                &text,
            ));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|source| JiraMcpError::MalformedResponse {
            path: url.path().to_string(),
            source,
        })
    }

    // ---------- User operations ----------

    /// User details by account id
    pub async fn get_user(&self, account_id: &str) -> Result<Value> {
        let url = self.api(&["user"])?;
        self.get(url, vec![("accountId", account_id.to_string())])
            .await
    }

    /// Users that can be assigned to a specific issue
    pub async fn get_assignable_users_for_issue(
        &self,
        issue_key: &str,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Value>> {
        let url = self.api(&["user", "assignable", "search"])?;
        let query = vec![
            ("issueKey", issue_key.to_string()),
            ("startAt", start.to_string()),
            ("maxResults", limit.to_string()),
        ];
        Ok(expect_list(self.get(url, query).await?))
    }

    /// Users that can be assigned to issues in a project
    pub async fn get_assignable_users_for_project(
        &self,
        project_key: &str,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Value>> {
        let url = self.api(&["user", "assignable", "search"])?;
        let query = vec![
            ("project", project_key.to_string()),
            ("startAt", start.to_string()),
            ("maxResults", limit.to_string()),
        ];
        Ok(expect_list(self.get(url, query).await?))
    }

    // ---------- Board operations ----------

    /// Agile boards, optionally restricted to one project
    pub async fn get_boards(
        &self,
        start: u32,
        limit: u32,
        project_key: Option<&str>,
    ) -> Result<Value> {
        let url = self.agile(&["board"])?;
        let mut query = page_query(start, limit);
        if let Some(project_key) = project_key {
            query.push(("projectKeyOrId", project_key.to_string()));
        }
        self.get(url, query).await
    }

    /// A single board
    pub async fn get_board(&self, board_id: u64) -> Result<Value> {
        let url = self.agile(&["board", &board_id.to_string()])?;
        self.get(url, Vec::new()).await
    }

    /// Issues on a board, optionally filtered by JQL
    pub async fn get_board_issues(
        &self,
        board_id: u64,
        start: u32,
        limit: u32,
        jql: Option<&str>,
    ) -> Result<Value> {
        let url = self.agile(&["board", &board_id.to_string(), "issue"])?;
        self.get(url, with_jql(page_query(start, limit), jql)).await
    }

    // ---------- Sprint operations ----------

    /// Sprints of a board; `state` is one of `active`, `closed`, `future`
    pub async fn get_sprints(
        &self,
        board_id: u64,
        start: u32,
        limit: u32,
        state: Option<&str>,
    ) -> Result<Value> {
        let url = self.agile(&["board", &board_id.to_string(), "sprint"])?;
        let mut query = page_query(start, limit);
        if let Some(state) = state {
            query.push(("state", state.to_string()));
        }
        self.get(url, query).await
    }

    /// A single sprint
    pub async fn get_sprint(&self, sprint_id: u64) -> Result<Value> {
        let url = self.agile(&["sprint", &sprint_id.to_string()])?;
        self.get(url, Vec::new()).await
    }

    /// Issues in a sprint, optionally filtered by JQL
    pub async fn get_sprint_issues(
        &self,
        sprint_id: u64,
        start: u32,
        limit: u32,
        jql: Option<&str>,
    ) -> Result<Value> {
        let url = self.agile(&["sprint", &sprint_id.to_string(), "issue"])?;
        self.get(url, with_jql(page_query(start, limit), jql)).await
    }

    /// Move issues into a sprint
    pub async fn move_issues_to_sprint(&self, sprint_id: u64, issue_keys: &[String]) -> Result<Value> {
        let url = self.agile(&["sprint", &sprint_id.to_string(), "issue"])?;
        self.post(url, &json!({ "issues": issue_keys })).await
    }

    // ---------- Version operations ----------

    /// All versions of a project
    pub async fn get_project_versions(&self, project_key: &str) -> Result<Vec<Value>> {
        let url = self.api(&["project", project_key, "versions"])?;
        Ok(expect_list(self.get(url, Vec::new()).await?))
    }

    /// Create a version/release
    pub async fn create_version(&self, version: &NewVersion<'_>) -> Result<Value> {
        let url = self.api(&["version"])?;
        self.post(url, version).await
    }

    /// Update a version; only the populated fields are sent
    pub async fn update_version(&self, version_id: &str, update: &VersionUpdate<'_>) -> Result<Value> {
        let url = self.api(&["version", version_id])?;
        self.put(url, update).await
    }

    // ---------- Component operations ----------

    /// All components of a project
    pub async fn get_project_components(&self, project_key: &str) -> Result<Vec<Value>> {
        let url = self.api(&["project", project_key, "components"])?;
        Ok(expect_list(self.get(url, Vec::new()).await?))
    }

    /// Create a component
    pub async fn create_component(&self, component: &NewComponent<'_>) -> Result<Value> {
        let url = self.api(&["component"])?;
        self.post(url, component).await
    }

    // ---------- Filter operations ----------

    /// Filters owned by the current user
    pub async fn get_my_filters(&self) -> Result<Vec<Value>> {
        let url = self.api(&["filter", "my"])?;
        Ok(expect_list(self.get(url, Vec::new()).await?))
    }

    /// Filters the current user marked as favourite
    pub async fn get_favourite_filters(&self) -> Result<Vec<Value>> {
        let url = self.api(&["filter", "favourite"])?;
        Ok(expect_list(self.get(url, Vec::new()).await?))
    }

    /// Issues matched by a saved filter
    pub async fn execute_filter(&self, filter_id: u64, start: u32, limit: u32) -> Result<Value> {
        let url = self.api(&["search"])?;
        let mut query = vec![("jql", format!("filter={filter_id}"))];
        query.extend(page_query(start, limit));
        self.get(url, query).await
    }
}

#[async_trait]
impl JiraOperations for JiraClient {
    async fn get_issue(
        &self,
        issue_key: &str,
        fields: Option<&str>,
        expand: Option<&str>,
    ) -> Result<Value> {
        let url = self.api(&["issue", issue_key])?;
        self.get(url, field_query(fields, expand)).await
    }

    async fn create_issue(
        &self,
        project: &str,
        summary: &str,
        description: &str,
        issue_type: &str,
        fields: Option<Map<String, Value>>,
    ) -> Result<Value> {
        let url = self.api(&["issue"])?;
        let fields = create_issue_fields(project, summary, description, issue_type, fields);
        self.post(url, &json!({ "fields": fields })).await
    }

    async fn update_issue(&self, issue_key: &str, fields: Map<String, Value>) -> Result<Value> {
        let url = self.api(&["issue", issue_key])?;
        self.put(url, &json!({ "fields": fields })).await
    }

    async fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
        fields: Option<&str>,
        expand: Option<&str>,
    ) -> Result<Value> {
        let url = self.api(&["search"])?;
        let mut query = vec![
            ("jql", jql.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        query.extend(field_query(fields, expand));
        self.get(url, query).await
    }

    async fn get_transitions(&self, issue_key: &str) -> Result<Vec<Value>> {
        let url = self.api(&["issue", issue_key, "transitions"])?;
        Ok(extract_list(self.get(url, Vec::new()).await?, "transitions"))
    }

    async fn transition_issue(
        &self,
        issue_key: &str,
        transition_id: &str,
        fields: Option<Map<String, Value>>,
        comment: Option<&str>,
    ) -> Result<Value> {
        let url = self.endpoint(&REST_API_V3, &["issue", issue_key, "transitions"])?;
        self.post(url, &transition_payload(transition_id, fields, comment))
            .await
    }

    async fn add_comment(&self, issue_key: &str, comment: &str) -> Result<Value> {
        let url = self.api(&["issue", issue_key, "comment"])?;
        self.post(url, &json!({ "body": comment })).await
    }

    async fn get_comments(&self, issue_key: &str) -> Result<Vec<Value>> {
        let url = self.api(&["issue", issue_key, "comment"])?;
        Ok(extract_list(self.get(url, Vec::new()).await?, "comments"))
    }

    async fn add_attachment(
        &self,
        issue_key: &str,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<Value> {
        let url = self.api(&["issue", issue_key, "attachments"])?;
        let part = reqwest::multipart::Part::bytes(content).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let builder = self
            .http
            .post(url.clone())
            .header("X-Atlassian-Token", "no-check")
            .multipart(form);
        self.send(Method::POST, &url, builder).await
    }

    async fn get_projects(&self) -> Result<Vec<Value>> {
        let url = self.api(&["project"])?;
        let response = self
            .get(url, vec![("includeArchived", "false".to_string())])
            .await?;
        Ok(expect_list(response))
    }

    async fn get_project(&self, project_key: &str) -> Result<Value> {
        let url = self.api(&["project", project_key])?;
        self.get(url, Vec::new()).await
    }

    async fn get_issue_types(&self, project_key: Option<&str>) -> Result<Vec<Value>> {
        match project_key {
            Some(project_key) => {
                let project = self.get_project(project_key).await?;
                Ok(extract_list(project, "issueTypes"))
            }
            None => {
                let url = self.api(&["issuetype"])?;
                Ok(expect_list(self.get(url, Vec::new()).await?))
            }
        }
    }

    async fn search_users(
        &self,
        query: &str,
        start: u32,
        limit: u32,
        include_inactive: bool,
    ) -> Result<Vec<Value>> {
        let url = self.api(&["user", "search"])?;
        let mut params = vec![("query", query.to_string())];
        params.extend(page_query(start, limit));
        params.push(("includeActive", "true".to_string()));
        params.push(("includeInactive", include_inactive.to_string()));
        Ok(expect_list(self.get(url, params).await?))
    }

    async fn add_worklog(
        &self,
        issue_key: &str,
        time_spent: &str,
        comment: Option<&str>,
        started: Option<&str>,
    ) -> Result<Value> {
        let url = self.api(&["issue", issue_key, "worklog"])?;
        self.post(url, &worklog_payload(time_spent, comment, started))
            .await
    }

    async fn get_worklogs(&self, issue_key: &str) -> Result<Vec<Value>> {
        let url = self.api(&["issue", issue_key, "worklog"])?;
        Ok(extract_list(self.get(url, Vec::new()).await?, "worklogs"))
    }

    async fn create_issue_link(
        &self,
        link_type: &str,
        inward_issue: &str,
        outward_issue: &str,
        comment: Option<&str>,
    ) -> Result<Value> {
        let url = self.api(&["issueLink"])?;
        let payload = issue_link_payload(link_type, inward_issue, outward_issue, comment);
        self.post(url, &payload).await
    }

    async fn get_issue_link_types(&self) -> Result<Vec<Value>> {
        let url = self.api(&["issueLinkType"])?;
        Ok(extract_list(self.get(url, Vec::new()).await?, "issueLinkTypes"))
    }

    async fn health_check(&self) -> Value {
        let result = match self.api(&["serverInfo"]) {
            Ok(url) => self.get(url, Vec::new()).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(info) => json!({ "status": "ok", "server_info": info }),
            Err(e) => {
                tracing::warn!(error = %e, "Jira health check failed");
                json!({ "status": "error", "error": e.to_string() })
            }
        }
    }
}

/// Body for creating a version
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVersion<'a> {
    /// Owning project key
    pub project: &'a str,
    /// Version name
    pub name: &'a str,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    /// Start date, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<&'a str>,
    /// Release date, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<&'a str>,
    /// Whether the version is archived
    pub archived: bool,
    /// Whether the version is released
    pub released: bool,
}

/// Partial update of a version
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionUpdate<'a> {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    /// Archive flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// Release flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<bool>,
    /// Release date, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<&'a str>,
}

/// Body for creating a component
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComponent<'a> {
    /// Owning project key
    pub project: &'a str,
    /// Component name
    pub name: &'a str,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    /// Component lead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_account_id: Option<&'a str>,
}

fn page_query(start: u32, limit: u32) -> Query<'static> {
    vec![
        ("startAt", start.to_string()),
        ("maxResults", limit.to_string()),
    ]
}

fn with_jql<'a>(mut query: Query<'a>, jql: Option<&str>) -> Query<'a> {
    if let Some(jql) = jql {
        query.push(("jql", jql.to_string()));
    }
    query
}

fn field_query(fields: Option<&str>, expand: Option<&str>) -> Query<'static> {
    let mut query = Vec::new();
    if let Some(fields) = fields {
        query.push(("fields", fields.to_string()));
    }
    if let Some(expand) = expand {
        query.push(("expand", expand.to_string()));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(url: &str) -> JiraConfig {
        JiraConfig::new(url, "dev@example.com", "token")
    }

    #[test]
    fn test_new_requires_credentials() {
        let err = JiraClient::new(&JiraConfig::new("https://x.atlassian.net", "", "")).err();
        assert!(matches!(err, Some(JiraMcpError::Config(_))));
    }

    #[test]
    fn test_new_rejects_unparseable_url() {
        let err = JiraClient::new(&config("not a url")).err();
        assert!(matches!(err, Some(JiraMcpError::Config(_))));
    }

    #[test]
    fn test_endpoint_keeps_context_path_and_encodes_segments() {
        let client = JiraClient::new(
            &config("https://example.com/jira").with_request_timeout(Duration::from_secs(1)),
        )
        .unwrap();

        let url = client.api(&["issue", "PROJ-1"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/jira/rest/api/2/issue/PROJ-1");

        let url = client.api(&["project", "A B"]).unwrap();
        assert_eq!(url.path(), "/jira/rest/api/2/project/A%20B");

        let url = client.agile(&["board", "7"]).unwrap();
        assert_eq!(url.path(), "/jira/rest/agile/1.0/board/7");
    }

    #[test]
    fn test_field_query_only_includes_present_values() {
        assert!(field_query(None, None).is_empty());
        assert_eq!(
            field_query(Some("summary"), Some("changelog")),
            vec![
                ("fields", "summary".to_string()),
                ("expand", "changelog".to_string())
            ]
        );
    }

    #[test]
    fn test_version_body_skips_absent_values() {
        let body = serde_json::to_value(NewVersion {
            project: "PROJ",
            name: "1.0",
            release_date: Some("2024-02-01"),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "project": "PROJ",
                "name": "1.0",
                "releaseDate": "2024-02-01",
                "archived": false,
                "released": false
            })
        );
    }
}
