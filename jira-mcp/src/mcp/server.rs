//! MCP server implementation for serving the Jira tool catalogue
//!
//! [`McpServer`] is the rmcp `ServerHandler`. It only marshals calls into
//! [`ToolRegistry::invoke`] and the resulting envelope back onto the wire; the
//! same handler is served over stdio or over SSE.

use super::envelope::Envelope;
use super::stdio::spawn_line_pumps;
use super::tool_registry::{ToolContext, ToolRegistry};
use super::tools::register_all_tools;
use crate::config::JiraConfig;
use crate::error::{JiraMcpError, Result};
use crate::jira::{JiraClient, JiraOperations};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rmcp::model::*;
use rmcp::service::{RequestContext, ServerInitializeError};
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use rmcp::{serve_server, Error as McpError, RoleServer, ServerHandler};
use serde_json::{Map, Value};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Path of the SSE event stream endpoint
pub const SSE_PATH: &str = "/sse";

/// Path clients post messages to
pub const MESSAGES_PATH: &str = "/messages";

/// How long SSE shutdown waits for open connections to finish
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

const INSTRUCTIONS: &str = "Jira tools for issues, comments, transitions, attachments, \
projects, users, worklogs and issue links. Every tool answers with \
{\"success\": true, \"data\": ...} or {\"success\": false, \"error\": \"...\"}. \
Use getTransitions before transitionIssue, searchUsers to find an accountId for \
assignments and getIssueLinkTypes before createIssueLink.";

/// MCP server exposing Jira operations as tools
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    /// Tool context containing shared state for tool execution
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a server talking to the Jira site described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a required value is missing; in that
    /// case no tool is registered and no client is built.
    pub fn new(config: JiraConfig) -> Result<Self> {
        config.validate()?;
        let client = JiraClient::new(&config)?;
        Self::with_client(config, Arc::new(client))
    }

    /// Create a server that calls through `client` instead of a real Jira site.
    ///
    /// # Errors
    ///
    /// Same configuration check as [`McpServer::new`].
    pub fn with_client(config: JiraConfig, client: Arc<dyn JiraOperations>) -> Result<Self> {
        config.validate()?;

        let mut tool_registry = ToolRegistry::new();
        register_all_tools(&mut tool_registry)?;
        tracing::debug!(tools = tool_registry.len(), "Registered MCP tools");

        Ok(Self {
            tool_registry: Arc::new(tool_registry),
            tool_context: Arc::new(ToolContext::new(client, Arc::new(config))),
        })
    }

    /// The tool catalogue
    pub fn registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Invoke a tool by name with raw arguments
    pub async fn invoke(&self, name: &str, arguments: Option<Map<String, Value>>) -> Envelope {
        self.tool_registry
            .invoke(name, arguments, &self.tool_context)
            .await
    }

    /// Serve over stdin/stdout until the peer disconnects or `ct` is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`JiraMcpError::Transport`] if the MCP handshake or the service
    /// task fails.
    pub async fn serve_stdio(self, ct: CancellationToken) -> Result<()> {
        self.serve_io(tokio::io::stdin(), tokio::io::stdout(), ct).await
    }

    /// Serve newline-delimited JSON-RPC read from `input` and written to
    /// `output` until the input closes or `ct` is cancelled.
    ///
    /// Input closing before the handshake completes is a normal shutdown.
    /// Once it closes afterwards, calls already read still get their responses
    /// written before the service stops.
    ///
    /// # Errors
    ///
    /// Returns [`JiraMcpError::Transport`] if the MCP handshake or the service
    /// task fails.
    pub async fn serve_io<R, W>(self, input: R, output: W, ct: CancellationToken) -> Result<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (transport, _pumps) = spawn_line_pumps(input, output);

        let running = tokio::select! {
            started = serve_server(self, transport) => match started {
                Ok(running) => running,
                Err(ServerInitializeError::ConnectionClosed(during)) => {
                    tracing::info!(%during, "MCP client closed the connection before initializing");
                    return Ok(());
                }
                Err(e) => return Err(JiraMcpError::Transport(e.to_string())),
            },
            _ = ct.cancelled() => {
                tracing::info!("MCP server shutting down before handshake");
                return Ok(());
            }
        };
        tracing::info!("MCP server running on stdio");

        tokio::select! {
            quit = running.waiting() => {
                quit.map_err(|e| JiraMcpError::Transport(e.to_string()))?;
                tracing::info!("MCP client disconnected");
            }
            _ = ct.cancelled() => {
                tracing::info!("MCP server shutting down");
            }
        }
        Ok(())
    }

    /// Bind `addr` and serve over SSE until `ct` is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the address cannot be bound.
    pub async fn serve_sse(self, addr: SocketAddr, ct: CancellationToken) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_sse_on(listener, ct).await
    }

    /// Serve over SSE on an already bound listener until `ct` is cancelled.
    ///
    /// `GET /sse` opens a session stream, `POST /messages?sessionId=...`
    /// delivers client messages; every other route answers `404 Not Found`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener fails.
    pub async fn serve_sse_on(self, listener: TcpListener, ct: CancellationToken) -> Result<()> {
        let bind = listener.local_addr()?;
        let (sse_server, router) = SseServer::new(SseServerConfig {
            bind,
            sse_path: SSE_PATH.to_string(),
            post_path: MESSAGES_PATH.to_string(),
            ct: ct.child_token(),
            sse_keep_alive: None,
        });

        let router = router
            .fallback(not_found)
            .layer(axum::middleware::map_response(method_not_allowed_as_not_found));

        let server = self;
        let sessions = sse_server.with_service(move || server.clone());

        tracing::info!(%bind, "MCP server listening (SSE transport)");
        let shutdown = ct.clone();
        let serve = axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .into_future();
        tokio::pin!(serve);

        let stopped = tokio::select! {
            result = &mut serve => Some(result),
            _ = ct.cancelled() => None,
        };
        if let Some(result) = stopped {
            sessions.cancel();
            return result.map_err(Into::into);
        }

        // Open event streams never end on their own; bound the graceful shutdown
        sessions.cancel();
        match tokio::time::timeout(SHUTDOWN_GRACE, serve).await {
            Ok(result) => result?,
            Err(_) => tracing::info!(
                grace = ?SHUTDOWN_GRACE,
                "Closing SSE streams still open after shutdown grace period"
            ),
        }
        tracing::info!("SSE server stopped");
        Ok(())
    }
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "Not Found",
    )
        .into_response()
}

async fn method_not_allowed_as_not_found(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        not_found().await
    } else {
        response
    }
}

impl ServerHandler for McpServer {
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let envelope = self.invoke(&request.name, request.arguments).await;
        let text = serde_json::to_string(&envelope)
            .map_err(|e| McpError::internal_error(format!("Failed to encode result: {e}"), None))?;

        if envelope.is_success() {
            Ok(CallToolResult::success(vec![Content::text(text)]))
        } else {
            Ok(CallToolResult::error(vec![Content::text(text)]))
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                prompts: None,
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: None,
                logging: None,
                completions: None,
                experimental: None,
            },
            server_info: Implementation {
                name: "jira-mcp".into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::mock_client::MockJiraClient;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn config() -> JiraConfig {
        JiraConfig::new("https://example.atlassian.net", "dev@example.com", "token")
    }

    #[test]
    fn test_new_rejects_missing_configuration() {
        let err = McpServer::new(JiraConfig::new("", "", "")).err().unwrap();
        assert!(matches!(err, JiraMcpError::Config(_)));

        let err = McpServer::with_client(
            JiraConfig::new("https://example.atlassian.net", "dev@example.com", ""),
            Arc::new(MockJiraClient::new()),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("JIRA_API_TOKEN"));
    }

    #[test]
    fn test_catalogue_is_complete() {
        let server = McpServer::new(config()).unwrap();
        let mut names = server.registry().list_tool_names();
        names.sort_unstable();

        let mut expected = vec![
            "health",
            "getIssue",
            "createIssue",
            "updateIssue",
            "searchIssues",
            "getTransitions",
            "transitionIssue",
            "addComment",
            "getComments",
            "addAttachment",
            "getProjects",
            "getProject",
            "getIssueTypes",
            "searchUsers",
            "addWorklog",
            "getWorklogs",
            "createIssueLink",
            "getIssueLinkTypes",
        ];
        expected.sort_unstable();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_every_tool_has_a_description_and_object_schema() {
        let server = McpServer::new(config()).unwrap();
        for tool in server.registry().list_tools() {
            assert!(
                tool.description.as_deref().is_some_and(|d| !d.trim().is_empty()),
                "{} has no description",
                tool.name
            );
            assert_eq!(tool.input_schema["type"], json!("object"));
        }
    }

    #[test]
    fn test_server_info_advertises_tools() {
        let server = McpServer::new(config()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "jira-mcp");
    }

    #[tokio::test]
    async fn test_invoke_goes_through_the_client() {
        let mock = MockJiraClient::new();
        let server = McpServer::with_client(config(), Arc::new(mock.clone())).unwrap();

        let envelope = server
            .invoke("getIssue", json!({ "issue_key": "PROJ-7" }).as_object().cloned())
            .await;

        assert!(envelope.is_success());
        assert_eq!(mock.calls_for("get_issue").await[0].arguments["issue_key"], json!("PROJ-7"));
    }

    fn mock_server() -> McpServer {
        McpServer::with_client(config(), Arc::new(MockJiraClient::new())).unwrap()
    }

    const INITIALIZE: &str = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test-client","version":"1.0"}}}"#;
    const INITIALIZED: &str = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;

    #[tokio::test]
    async fn test_stdio_input_closed_before_handshake_is_clean_exit() {
        let (client, input) = tokio::io::duplex(1024);
        drop(client);

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            mock_server().serve_io(input, tokio::io::sink(), CancellationToken::new()),
        )
        .await
        .expect("serve_io should return once input closes");
        assert!(result.is_ok(), "{result:?}");
    }

    #[tokio::test]
    async fn test_stdio_cancel_before_handshake_returns() {
        let (_client, input) = tokio::io::duplex(1024);
        let ct = CancellationToken::new();
        let handle = tokio::spawn(mock_server().serve_io(input, tokio::io::sink(), ct.clone()));

        tokio::time::sleep(Duration::from_millis(50)).await;
        ct.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("cancel should stop a server waiting for its handshake")
            .unwrap();
        assert!(result.is_ok(), "{result:?}");
    }

    #[tokio::test]
    async fn test_stdio_answers_calls_sent_just_before_input_closes() {
        let (mut client, input) = tokio::io::duplex(64 * 1024);
        let (output, mut observer) = tokio::io::duplex(64 * 1024);
        let handle = tokio::spawn(mock_server().serve_io(input, output, CancellationToken::new()));

        let call = json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {
                "name": "searchIssues",
                "arguments": { "jql": "project = PROJ", "max_results": 0 }
            }
        });
        let script = format!("{INITIALIZE}\n{INITIALIZED}\n{call}\n");
        client.write_all(script.as_bytes()).await.unwrap();
        drop(client);

        let mut written = String::new();
        tokio::time::timeout(Duration::from_secs(10), observer.read_to_string(&mut written))
            .await
            .expect("output should close after the last response")
            .unwrap();
        handle.await.unwrap().unwrap();

        let response = written
            .lines()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .find(|message| message["id"] == json!(2))
            .expect("tools/call response");
        assert_eq!(response["result"]["isError"], json!(true));

        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let envelope: Value = serde_json::from_str(text).unwrap();
        assert_eq!(
            envelope,
            json!({
                "success": false,
                "error": "Parameter 'max_results' must be between 1 and 100, got 0"
            })
        );
    }
}
