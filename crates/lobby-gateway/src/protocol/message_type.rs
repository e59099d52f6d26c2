//! Message type tags
//!
//! The stable integer tags carried in the `TypeName` field of every client envelope.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Client message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    /// Create a room owned by the sender
    NewRoom = 0,
    /// Join an existing room as a member
    JoinRoom = 1,
    /// Leave a room the sender is a member of
    LeaveRoom = 2,
    /// Set the sender's user attribute
    InitUser = 3,
}

impl MessageType {
    /// Map a raw tag to a known message type
    #[must_use]
    pub fn from_tag(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::NewRoom),
            1 => Some(Self::JoinRoom),
            2 => Some(Self::LeaveRoom),
            3 => Some(Self::InitUser),
            _ => None,
        }
    }

    /// Get the raw integer value
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get the name of this message type
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewRoom => "NewRoom",
            Self::JoinRoom => "JoinRoom",
            Self::LeaveRoom => "LeaveRoom",
            Self::InitUser => "InitUser",
        }
    }
}

impl Serialize for MessageType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for MessageType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Self::from_tag(value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown message type: {value}")))
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u8())
    }
}
