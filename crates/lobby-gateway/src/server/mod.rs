//! Gateway server setup
//!
//! Provides the main WebSocket server configuration and routes.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use axum::{extract::State, routing::get, Json, Router};
use lobby_common::{AppConfig, AppError};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Health check response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub connections: usize,
    pub rooms: usize,
}

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/ws", get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        connections: state.connection_manager().connection_count(),
        rooms: state.room_registry().room_count(),
    })
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create `GatewayState` from configuration
pub fn create_gateway_state(config: AppConfig) -> GatewayState {
    tracing::info!(
        heartbeat_secs = config.heartbeat.interval_secs,
        message_buffer = config.gateway.message_buffer,
        "Creating gateway state"
    );

    GatewayState::new(config)
}

/// Run the gateway server until Ctrl-C
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    tracing::info!("Starting Gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Bind(format!("{addr}: {e}")))?;

    let local = listener.local_addr().map_err(AppError::internal)?;
    tracing::info!("Gateway listening on ws://{}/ws", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    tracing::info!("Gateway stopped");
    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.gateway.address();

    let state = create_gateway_state(config);
    let app = create_app(state);

    run_server(app, &addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
