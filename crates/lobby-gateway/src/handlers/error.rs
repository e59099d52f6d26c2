//! Handler error types

use crate::protocol::{ErrorFrame, OutboundFrame};
use crate::rooms::RoomError;
use thiserror::Error;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Envelope tag is not a known message type
    #[error("unknown message format")]
    UnknownMessageFormat,

    /// Payload does not match the shape the tag requires
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Frame is not a JSON envelope
    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// Frame is not a text frame
    #[error("unsupported message type")]
    UnsupportedMessageType,

    /// Registry rejected the operation
    #[error(transparent)]
    Room(#[from] RoomError),
}

impl HandlerError {
    /// The operation that failed, as reported to the peer
    pub fn action(&self) -> &'static str {
        match self {
            Self::UnknownMessageFormat => "types",
            Self::MalformedPayload(_) => "payload",
            Self::InvalidJson(_) | Self::UnsupportedMessageType => "message parsing",
            Self::Room(e) => e.action(),
        }
    }

    /// Convert to the wire error shape
    pub fn to_error_frame(&self) -> ErrorFrame {
        ErrorFrame::new(self.to_string(), self.action())
    }

    /// Convert to an outbound frame
    pub fn to_frame(&self) -> OutboundFrame {
        self.to_error_frame().to_frame()
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
