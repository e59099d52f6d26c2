//! Connection lifecycle
//!
//! Turns the transport's open, message, and close events into session and registry
//! operations. Closed is terminal, and teardown runs once per connection however
//! many sources report the close.

use super::{Connection, ConnectionManager, HeartbeatMonitor, Session};
use crate::handlers::{HandlerError, MessageDispatcher};
use crate::protocol::{Envelope, FrameKind, OutboundFrame};
use crate::rooms::RoomRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Per-connection state machine driver
#[derive(Debug, Clone)]
pub struct ConnectionLifecycleManager {
    registry: Arc<RoomRegistry>,
    connections: Arc<ConnectionManager>,
    heartbeat_interval: Duration,
}

impl ConnectionLifecycleManager {
    /// Create a lifecycle manager over shared registries
    pub fn new(
        registry: Arc<RoomRegistry>,
        connections: Arc<ConnectionManager>,
        heartbeat_interval: Duration,
    ) -> Self {
        Self {
            registry,
            connections,
            heartbeat_interval,
        }
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    pub fn connections(&self) -> &Arc<ConnectionManager> {
        &self.connections
    }

    pub fn heartbeat_interval(&self) -> Duration {
        self.heartbeat_interval
    }

    /// Transport opened
    ///
    /// Allocates a fresh session, starts its heartbeat, and writes the session's
    /// identity as the first frame on `sender`.
    pub async fn on_open(&self, sender: mpsc::Sender<OutboundFrame>) -> Arc<Connection> {
        let session = Session::new(sender.clone());
        let identity = OutboundFrame::json(&session);
        let connection = self.connections.add_connection(session);

        let monitor = HeartbeatMonitor::start(connection.id(), sender, self.heartbeat_interval);
        if let Some(monitor) = connection.attach_heartbeat(monitor) {
            monitor.cancel().await;
        }
        connection.activate();

        tracing::info!(session_id = %connection.id(), "Connection opened");

        if connection.send(identity).await.is_err() {
            tracing::warn!(session_id = %connection.id(), "Failed to send session identity");
            self.on_close(&connection, Some("identity write failed"))
                .await;
        }

        connection
    }

    /// Frame received
    ///
    /// Writes exactly one response frame. The connection's session stays locked until
    /// the handler returns, so messages from one peer are handled in order.
    pub async fn on_message(&self, connection: &Arc<Connection>, kind: FrameKind, data: &[u8]) {
        if connection.is_closed() {
            tracing::trace!(session_id = %connection.id(), "Frame after close ignored");
            return;
        }

        let response = match kind {
            FrameKind::Binary => {
                tracing::debug!(session_id = %connection.id(), "Binary frames not supported");
                HandlerError::UnsupportedMessageType.to_frame()
            }
            FrameKind::Text => match Envelope::from_slice(data) {
                Ok(envelope) => {
                    let mut session = connection.session().await;
                    // Teardown may have started while waiting for the session
                    if connection.is_closed() {
                        tracing::trace!(session_id = %connection.id(), "Frame after close ignored");
                        return;
                    }
                    MessageDispatcher::handle(&self.registry, &mut session, envelope).await
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %connection.id(),
                        error = %e,
                        "Failed to parse envelope"
                    );
                    HandlerError::InvalidJson(e.to_string()).to_frame()
                }
            },
        };

        if connection.send(response).await.is_err() {
            tracing::warn!(session_id = %connection.id(), "Failed to send response");
            self.on_close(connection, Some("response write failed"))
                .await;
        }
    }

    /// Transport closed or failed
    ///
    /// Returns `true` for the call that performed the teardown and `false` for every
    /// later one. Messages that take the session lock after teardown began are dropped
    /// unanswered.
    pub async fn on_close(&self, connection: &Arc<Connection>, reason: Option<&str>) -> bool {
        if !connection.begin_close() {
            return false;
        }

        if let Some(monitor) = connection.take_heartbeat() {
            monitor.cancel().await;
        }

        // Held through cleanup so no message can act on the session halfway through
        let session = connection.session().await;
        self.registry.remove_user(&session).await;
        drop(session);
        self.connections.remove_connection(connection.id());

        tracing::info!(
            session_id = %connection.id(),
            reason = reason.unwrap_or("peer closed"),
            age_ms = connection.age().as_millis(),
            "Connection closed"
        );

        true
    }
}
