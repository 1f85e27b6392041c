//! Configuration for the Jira MCP server
//!
//! Configuration is read once from the environment at startup and then owned,
//! read-only, by the server for its whole lifetime.

use crate::common::env_loader::EnvLoader;
use crate::error::{JiraMcpError, Result};
use std::fmt;
use std::time::Duration;

/// Upper bound for a single outbound Jira request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_PREFIX: &str = "JIRA";

/// Connection settings for a Jira site
#[derive(Clone, PartialEq, Eq)]
pub struct JiraConfig {
    /// Base URL of the Jira site, e.g. `https://example.atlassian.net`
    pub base_url: String,
    /// Account email used for basic authentication
    pub email: String,
    /// API token paired with `email`
    pub api_token: String,
    /// Project key reported by the health tool
    pub default_project: Option<String>,
    /// Timeout applied to every outbound request
    pub request_timeout: Duration,
}

impl JiraConfig {
    /// Create a configuration from explicit values
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            email: email.into(),
            api_token: api_token.into(),
            default_project: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Load configuration from `JIRA_URL`, `JIRA_EMAIL`, `JIRA_API_TOKEN`
    /// and `JIRA_DEFAULT_PROJECT`.
    ///
    /// Missing required values come back as empty strings; call
    /// [`JiraConfig::validate`] before using the result.
    pub fn from_env() -> Self {
        let loader = EnvLoader::new(ENV_PREFIX);
        Self {
            base_url: normalize_base_url(&loader.load_string("URL", "")),
            email: loader.load_string("EMAIL", ""),
            api_token: loader.load_string("API_TOKEN", ""),
            default_project: loader.load_optional("DEFAULT_PROJECT"),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the default project key
    pub fn with_default_project(mut self, project: impl Into<String>) -> Self {
        self.default_project = Some(project.into());
        self
    }

    /// Override the outbound request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Check that every required value is present.
    ///
    /// # Errors
    ///
    /// Returns [`JiraMcpError::Config`] listing each missing variable.
    pub fn validate(&self) -> Result<()> {
        let loader = EnvLoader::new(ENV_PREFIX);
        let missing: Vec<String> = [
            ("URL", &self.base_url),
            ("EMAIL", &self.email),
            ("API_TOKEN", &self.api_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(suffix, _)| loader.key(suffix))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(JiraMcpError::Config(format!(
                "{} must be provided (missing: {})",
                ["URL", "EMAIL", "API_TOKEN"]
                    .map(|suffix| loader.key(suffix))
                    .join(", "),
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("default_project", &self.default_project)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
