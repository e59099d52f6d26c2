//! Session values
//!
//! One connected peer's identity, its mutable attributes, and the channel that reaches it.

use crate::protocol::OutboundFrame;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

/// A connected peer
///
/// The connection owns the canonical record. Rooms hold clones taken when the peer
/// joined; attribute changes made afterwards are not reflected in those clones.
/// Equality is by `id` only.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    #[serde(rename = "userId")]
    id: Uuid,

    #[serde(rename = "isRoomOwner")]
    is_room_owner: bool,

    #[serde(rename = "userDSP")]
    attribute: String,

    #[serde(skip)]
    transport: mpsc::Sender<OutboundFrame>,
}

impl Session {
    /// Create a session with a fresh random identity
    #[must_use]
    pub fn new(transport: mpsc::Sender<OutboundFrame>) -> Self {
        Self::with_id(Self::generate_id(), transport)
    }

    /// Create a session with a known identity
    #[must_use]
    pub fn with_id(id: Uuid, transport: mpsc::Sender<OutboundFrame>) -> Self {
        Self {
            id,
            is_room_owner: false,
            attribute: String::new(),
            transport,
        }
    }

    /// Generate a new session ID
    #[must_use]
    pub fn generate_id() -> Uuid {
        Uuid::new_v4()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_room_owner(&self) -> bool {
        self.is_room_owner
    }

    pub fn set_room_owner(&mut self, owner: bool) {
        self.is_room_owner = owner;
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn set_attribute(&mut self, attribute: impl Into<String>) {
        self.attribute = attribute.into();
    }

    /// Queue a frame for this peer
    pub async fn send(
        &self,
        frame: OutboundFrame,
    ) -> Result<(), mpsc::error::SendError<OutboundFrame>> {
        self.transport.send(frame).await
    }

    /// Try to queue a frame without waiting for room
    pub fn try_send(
        &self,
        frame: OutboundFrame,
    ) -> Result<(), mpsc::error::TrySendError<OutboundFrame>> {
        self.transport.try_send(frame)
    }

    /// Get a clone of the transport channel
    pub fn transport(&self) -> mpsc::Sender<OutboundFrame> {
        self.transport.clone()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Session {}
