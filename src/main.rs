/// Hello World GPT App Entry Point
///
/// Installs the tracing subscriber, loads configuration from the environment
/// and runs the HTTP server.
///
/// Environment Variables:
/// - PORT: Port number (default: 3000)
/// - HOST: Bind address (default: "0.0.0.0")
/// - LOG_FORMAT: "text" or "json" (default: "text")
/// - RUST_LOG: tracing filter directives (default: "info")
///
/// See `core::config::ServerConfig::from_env` for the remaining settings.

mod core;
mod tools;

use tracing_subscriber::EnvFilter;

use crate::core::config::ServerConfig;
use crate::core::server;
use crate::core::utils::get_env_var;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&get_env_var("LOG_FORMAT", "text"));

    let config = ServerConfig::from_env();
    tracing::debug!(?config, "loaded configuration");

    server::run_server_http(config).await?;
    Ok(())
}

/// Install the global subscriber. Request logs from actix's `Logger`
/// (emitted through the `log` facade) are bridged into it.
fn init_tracing(format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
