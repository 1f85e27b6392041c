use anyhow::Context;
use jira_mcp::{JiraConfig, McpServer};
use jira_mcp_cli::cli::{Cli, Transport};
use jira_mcp_cli::error::{handle_cli_result, CliError, CliResult};
use jira_mcp_cli::exit_codes::EXIT_ERROR;
use jira_mcp_cli::logging;
use std::net::{SocketAddr, ToSocketAddrs};
use std::process;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    logging::init(&cli);

    let exit_code = handle_cli_result(run(cli).await);
    process::exit(exit_code);
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = JiraConfig::from_env();
    let server = McpServer::new(config)?;

    let ct = CancellationToken::new();
    spawn_interrupt_handler(ct.clone());

    match cli.transport {
        Transport::Stdio => {
            tracing::info!("Starting MCP server (stdio transport)");
            server.serve_stdio(ct).await?;
        }
        Transport::Sse => {
            let addr = resolve_bind_address(&cli)
                .map_err(|e| CliError::from_anyhow(e, EXIT_ERROR))?;
            eprintln!("Starting MCP server on http://{}", cli.bind_address());
            server.serve_sse(addr, ct).await?;
        }
    }

    Ok(())
}

fn spawn_interrupt_handler(ct: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                eprintln!("Interrupted");
                tracing::info!("Shutdown signal received");
                ct.cancel();
            }
            Err(e) => tracing::warn!("Failed to listen for Ctrl-C: {}", e),
        }
    });
}

fn resolve_bind_address(cli: &Cli) -> anyhow::Result<SocketAddr> {
    let address = cli.bind_address();
    address
        .to_socket_addrs()
        .with_context(|| format!("Failed to resolve {address}"))?
        .next()
        .with_context(|| format!("No address found for {address}"))
}
