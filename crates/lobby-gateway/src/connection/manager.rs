//! Connection manager
//!
//! Tracks every live connection using DashMap for thread-safe access.

use super::{Connection, Session};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by session ID
    connections: DashMap<Uuid, Arc<Connection>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection around `session`
    pub fn add_connection(&self, session: Session) -> Arc<Connection> {
        let connection = Connection::new(session);
        self.connections.insert(connection.id(), connection.clone());

        tracing::debug!(session_id = %connection.id(), "Connection added");

        connection
    }

    /// Remove a connection, returning it if it was registered
    pub fn remove_connection(&self, session_id: Uuid) -> Option<Arc<Connection>> {
        let removed = self.connections.remove(&session_id).map(|(_, c)| c);

        if removed.is_some() {
            tracing::debug!(session_id = %session_id, "Connection removed");
        }

        removed
    }

    /// Get a connection by session ID
    pub fn get_connection(&self, session_id: Uuid) -> Option<Arc<Connection>> {
        self.connections.get(&session_id).map(|r| r.clone())
    }

    /// Check if a session is connected
    pub fn has_session(&self, session_id: Uuid) -> bool {
        self.connections.contains_key(&session_id)
    }

    /// Get total connection count
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get all connected session IDs
    pub fn session_ids(&self) -> Vec<Uuid> {
        self.connections.iter().map(|r| *r.key()).collect()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .finish()
    }
}
