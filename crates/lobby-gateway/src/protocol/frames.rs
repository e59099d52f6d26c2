//! Transport frames
//!
//! What the core writes to, and reads from, a connection's duplex channel.

use serde::{Deserialize, Serialize};

/// Kind of an inbound frame as reported by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Text,
    Binary,
}

/// A frame queued for delivery to one peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// Text data frame
    Text(String),
    /// Liveness probe control frame
    Ping(Vec<u8>),
}

impl OutboundFrame {
    /// Body of a liveness probe
    pub const PROBE_BODY: &'static [u8] = b"ping";

    /// Success marker with no body
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Liveness probe
    #[must_use]
    pub fn probe() -> Self {
        Self::Ping(Self::PROBE_BODY.to_vec())
    }

    /// Encode a value as a JSON text frame
    ///
    /// # Panics
    /// Panics if the value cannot be encoded. Every type written to peers is plain data,
    /// so a failure is a bug in this crate rather than bad input.
    #[must_use]
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(text) => Self::Text(text),
            Err(e) => panic!("outgoing frame is not encodable: {e}"),
        }
    }

    /// Text body, if this is a data frame
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Ping(_) => None,
        }
    }
}

/// Structured failure sent back to the peer that caused it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorFrame {
    pub error_message: String,
    pub action: String,
}

impl ErrorFrame {
    #[must_use]
    pub fn new(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
            action: action.into(),
        }
    }

    #[must_use]
    pub fn to_frame(&self) -> OutboundFrame {
        OutboundFrame::json(self)
    }
}
