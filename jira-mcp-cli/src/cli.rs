use clap::{Parser, ValueEnum};
use is_terminal::IsTerminal;
use std::io;

/// Transport the MCP server is served over
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    Stdio,
    /// Server-sent events over HTTP
    Sse,
}

#[derive(Parser, Debug)]
#[command(name = "jira-mcp")]
#[command(version)]
#[command(about = "An MCP server exposing Jira issues, projects and users as tools")]
#[command(long_about = "
jira-mcp is an MCP (Model Context Protocol) server that exposes a Jira site
as a catalogue of tools: issues, comments, transitions, attachments,
projects, users, worklogs and issue links.

Connection settings are read from the environment:
  JIRA_URL              Base URL of the Jira site
  JIRA_EMAIL            Account email used for basic authentication
  JIRA_API_TOKEN        API token for that account
  JIRA_DEFAULT_PROJECT  Optional project key reported by the health tool

Example usage:
  jira-mcp                                # Serve over stdio
  jira-mcp --transport sse --port 9001    # Serve over SSE on 0.0.0.0:9001
")]
pub struct Cli {
    /// Transport to serve on
    #[arg(long, value_enum, env = "MCP_TRANSPORT", default_value = "stdio")]
    pub transport: Transport,

    /// Host to bind in SSE mode
    #[arg(long, env = "MCP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind in SSE mode
    #[arg(long, env = "MCP_PORT", default_value_t = 9001)]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    /// `host:port` string the SSE transport binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_tty() -> bool {
        io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_transport_env() {
        env::remove_var("MCP_TRANSPORT");
        env::remove_var("MCP_HOST");
        env::remove_var("MCP_PORT");
    }

    #[test]
    fn test_cli_help_works() {
        let result = Cli::try_parse_from_args(["jira-mcp", "--help"]);
        assert!(result.is_err());

        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_works() {
        let result = Cli::try_parse_from_args(["jira-mcp", "--version"]);
        assert!(result.is_err());

        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    #[serial]
    fn test_cli_defaults() {
        clear_transport_env();
        let cli = Cli::try_parse_from_args(["jira-mcp"]).unwrap();

        assert_eq!(cli.transport, Transport::Stdio);
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 9001);
        assert_eq!(cli.bind_address(), "0.0.0.0:9001");
        assert!(!cli.verbose);
        assert!(!cli.debug);
        assert!(!cli.quiet);
    }

    #[test]
    #[serial]
    fn test_cli_reads_environment() {
        clear_transport_env();
        env::set_var("MCP_TRANSPORT", "sse");
        env::set_var("MCP_HOST", "127.0.0.1");
        env::set_var("MCP_PORT", "8080");

        let cli = Cli::try_parse_from_args(["jira-mcp"]).unwrap();
        clear_transport_env();

        assert_eq!(cli.transport, Transport::Sse);
        assert_eq!(cli.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    #[serial]
    fn test_cli_flags_beat_environment() {
        clear_transport_env();
        env::set_var("MCP_TRANSPORT", "sse");
        env::set_var("MCP_PORT", "8080");

        let cli = Cli::try_parse_from_args(["jira-mcp", "--transport", "stdio", "--port", "7000"])
            .unwrap();
        clear_transport_env();

        assert_eq!(cli.transport, Transport::Stdio);
        assert_eq!(cli.port, 7000);
    }

    #[test]
    #[serial]
    fn test_cli_rejects_unknown_transport() {
        clear_transport_env();
        let result = Cli::try_parse_from_args(["jira-mcp", "--transport", "websocket"]);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    #[serial]
    fn test_cli_verbosity_flags() {
        clear_transport_env();
        let cli = Cli::try_parse_from_args(["jira-mcp", "-v", "-d", "-q"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.debug);
        assert!(cli.quiet);
    }
}
