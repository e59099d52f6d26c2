//! Client payload definitions
//!
//! Defines the payload structures for client-to-server messages.

use serde::{Deserialize, Serialize};

/// Payload for `NewRoom` (0)
///
/// An empty or absent `roomId` asks the server to generate one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoomPayload {
    #[serde(default)]
    pub room_id: String,

    /// Member capacity, owner excluded; zero means unbounded
    pub max_members: u32,
}

/// Payload for `JoinRoom` (1)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub room_id: String,
}

/// Payload for `LeaveRoom` (2)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRoomPayload {
    pub room_id: String,
}

/// Payload for `InitUser` (3)
///
/// The attribute is opaque to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitUserPayload {
    #[serde(alias = "userDSP")]
    pub attribute: String,
}
