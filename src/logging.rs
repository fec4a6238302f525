//! Tracing subscriber setup shared by the `edgecolor` binary.

use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::edge_list::CliError;

/// Installs the global `tracing` subscriber with an env-filter directive such
/// as `info` or `vizing=debug`.
pub fn init_logging(level: &str) -> Result<(), CliError> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| CliError::Message(format!("Invalid log level: {e}")))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| CliError::Message("Logging already initialized".into()))
}
