//! Tool registry for MCP operations
//!
//! The registry owns the fixed tool catalogue. It resolves a tool by exact
//! name, checks the raw arguments against the tool's compiled input schema and
//! runs the tool behind the envelope fault boundary.

use super::envelope::{run_enveloped, Envelope};
use super::schema::ArgumentSchema;
use crate::config::JiraConfig;
use crate::error::{JiraMcpError, Result};
use crate::jira::JiraOperations;
use rmcp::model::Tool;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Context shared by all tools during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Jira operations the tools call through
    pub client: Arc<dyn JiraOperations>,
    /// Read-only server configuration
    pub config: Arc<JiraConfig>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(client: Arc<dyn JiraOperations>, config: Arc<JiraConfig>) -> Self {
        Self { client, config }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> Value;

    /// Execute the tool with arguments already checked against [`McpTool::schema`]
    async fn execute(&self, arguments: Map<String, Value>, context: &ToolContext) -> Result<Value>;
}

struct RegisteredTool {
    tool: Box<dyn McpTool>,
    schema: ArgumentSchema,
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool in the registry.
    ///
    /// # Errors
    ///
    /// Returns [`JiraMcpError::DuplicateTool`] if the name is already taken,
    /// or [`JiraMcpError::Internal`] if the tool's schema does not compile.
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) -> Result<()> {
        let name = tool.name();
        if self.index.contains_key(name) {
            return Err(JiraMcpError::DuplicateTool(name.to_string()));
        }
        let schema = ArgumentSchema::compile(tool.schema())?;
        self.index.insert(name, self.tools.len());
        self.tools.push(RegisteredTool {
            tool: Box::new(tool),
            schema,
        });
        Ok(())
    }

    fn entry(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.entry(name).map(|entry| entry.tool.as_ref())
    }

    /// List all registered tool names in registration order
    pub fn list_tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|entry| entry.tool.name()).collect()
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|entry| {
                let schema_map = match entry.schema.schema() {
                    Value::Object(map) => map.clone(),
                    _ => Map::new(),
                };

                Tool {
                    name: entry.tool.name().into(),
                    description: Some(entry.tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Resolve, validate and run a tool; always answers with an envelope
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
        context: &ToolContext,
    ) -> Envelope {
        let Some(entry) = self.entry(name) else {
            return Envelope::from_error(name, &JiraMcpError::UnknownTool(name.to_string()));
        };

        tracing::debug!(tool = name, "Invoking tool");

        run_enveloped(name, || async move {
            let arguments = entry.schema.validate(arguments.unwrap_or_default())?;
            entry.tool.execute(arguments, context).await
        })
        .await
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    ///
    /// # Arguments
    ///
    /// * `arguments` - The validated JSON map of arguments
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The parsed arguments or an invalid input error
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: Map<String, Value>,
    ) -> Result<T> {
        serde_json::from_value(Value::Object(arguments))
            .map_err(|e| JiraMcpError::invalid_input(format!("Invalid arguments: {e}")))
    }
}
