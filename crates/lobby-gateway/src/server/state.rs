//! Gateway state
//!
//! Application state for the gateway server.

use crate::connection::{ConnectionLifecycleManager, ConnectionManager};
use crate::rooms::RoomRegistry;
use lobby_common::AppConfig;
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Drives every connection's open, message, and close events
    lifecycle: Arc<ConnectionLifecycleManager>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state with empty registries
    pub fn new(config: AppConfig) -> Self {
        let lifecycle = ConnectionLifecycleManager::new(
            RoomRegistry::new_shared(),
            ConnectionManager::new_shared(),
            config.heartbeat.interval(),
        );

        Self {
            lifecycle: Arc::new(lifecycle),
            config: Arc::new(config),
        }
    }

    /// Get the lifecycle manager
    pub fn lifecycle(&self) -> &ConnectionLifecycleManager {
        &self.lifecycle
    }

    /// Get the room registry
    pub fn room_registry(&self) -> &RoomRegistry {
        self.lifecycle.registry()
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        self.lifecycle.connections()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("lifecycle", &self.lifecycle)
            .field("config", &"AppConfig")
            .finish()
    }
}
