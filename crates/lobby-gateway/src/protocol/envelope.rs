//! Client envelope format
//!
//! Every inbound text frame is `{ "TypeName": <int>, "Payload": <object> }`.

use super::MessageType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tagged envelope wrapping one client request
///
/// The tag is kept raw so that unknown tags survive decoding and can be reported
/// as such instead of as a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Message type tag
    #[serde(rename = "TypeName")]
    pub type_name: i64,

    /// Untyped payload, decoded once the handler is known
    #[serde(rename = "Payload", default)]
    pub payload: Value,
}

impl Envelope {
    /// Build an envelope for a known message type
    #[must_use]
    pub fn new(message_type: MessageType, payload: Value) -> Self {
        Self {
            type_name: i64::from(message_type.as_u8()),
            payload,
        }
    }

    /// The message type, if the tag is one we recognize
    #[must_use]
    pub fn message_type(&self) -> Option<MessageType> {
        MessageType::from_tag(self.type_name)
    }

    /// Decode the payload into a handler's expected shape
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }

    /// Deserialize from raw frame bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message_type() {
            Some(message_type) => write!(f, "Envelope({message_type})"),
            None => write!(f, "Envelope(unknown {})", self.type_name),
        }
    }
}
