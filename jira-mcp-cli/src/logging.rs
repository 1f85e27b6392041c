//! Log subscriber setup
//!
//! Logs always go to stderr: in stdio mode stdout carries the protocol.

use crate::cli::Cli;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level selected by the verbosity flags when `RUST_LOG` is not set
pub fn level_for(cli: &Cli) -> Level {
    if cli.quiet {
        Level::ERROR
    } else if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the flags.
pub fn init(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(cli).as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(Cli::is_tty())
        .init();
}
