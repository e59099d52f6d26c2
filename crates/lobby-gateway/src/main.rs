//! Lobby Gateway Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p lobby-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use lobby_common::{try_init_tracing_with_config, AppConfig, AppError, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration decides the log format, so tracing starts after it loads
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, code = e.error_code(), "Gateway failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.gateway.address(),
        heartbeat_secs = config.heartbeat.interval_secs,
        "Configuration loaded"
    );

    lobby_gateway::run(config).await
}
