//! Individual WebSocket connection
//!
//! Holds the canonical session for one peer, its lifecycle state, and its heartbeat.

use super::{HeartbeatMonitor, Session};
use crate::protocol::OutboundFrame;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex as AsyncMutex, MutexGuard};
use uuid::Uuid;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Registered, identity not yet delivered
    Connecting,
    /// Identity delivered, accepting messages
    Active,
    /// Cleanup has started or finished
    Closed,
}

/// A single WebSocket connection
pub struct Connection {
    /// Session ID, fixed for the connection's life
    id: Uuid,

    /// Canonical session record
    session: AsyncMutex<Session>,

    /// Current connection state
    state: Mutex<ConnectionState>,

    /// Channel to send frames to the WebSocket
    sender: mpsc::Sender<OutboundFrame>,

    /// Running probe task, if any
    heartbeat: Mutex<Option<HeartbeatMonitor>>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection around its canonical session
    pub fn new(session: Session) -> Arc<Self> {
        Arc::new(Self {
            id: session.id(),
            sender: session.transport(),
            session: AsyncMutex::new(session),
            state: Mutex::new(ConnectionState::Connecting),
            heartbeat: Mutex::new(None),
            created_at: Instant::now(),
        })
    }

    /// Get the session ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Lock the canonical session
    ///
    /// Held for the whole handling of one inbound message, so messages from the same
    /// peer are applied one at a time.
    pub async fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Move from connecting to active; a closed connection stays closed
    pub fn activate(&self) {
        let mut state = self.state.lock();
        if *state == ConnectionState::Connecting {
            *state = ConnectionState::Active;
        }
    }

    /// Mark the connection closed
    ///
    /// Returns `true` only for the first caller.
    pub fn begin_close(&self) -> bool {
        let mut state = self.state.lock();
        if *state == ConnectionState::Closed {
            return false;
        }
        *state = ConnectionState::Closed;
        true
    }

    /// Check if the connection is closed
    pub fn is_closed(&self) -> bool {
        self.state() == ConnectionState::Closed
    }

    /// Attach the probe task
    ///
    /// If the connection already closed, the monitor is handed back so the caller
    /// can cancel it.
    pub fn attach_heartbeat(&self, monitor: HeartbeatMonitor) -> Option<HeartbeatMonitor> {
        let state = self.state.lock();
        if *state == ConnectionState::Closed {
            return Some(monitor);
        }
        *self.heartbeat.lock() = Some(monitor);
        None
    }

    /// Detach the probe task
    pub fn take_heartbeat(&self) -> Option<HeartbeatMonitor> {
        self.heartbeat.lock().take()
    }

    /// Queue a frame for this connection
    pub async fn send(
        &self,
        frame: OutboundFrame,
    ) -> Result<(), mpsc::error::SendError<OutboundFrame>> {
        self.sender.send(frame).await
    }

    /// Get connection age
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("age", &self.age())
            .finish_non_exhaustive()
    }
}
