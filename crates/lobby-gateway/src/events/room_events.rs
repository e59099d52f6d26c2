//! Room membership events

use crate::connection::Session;
use crate::protocol::OutboundFrame;
use serde::Serialize;

/// Event pushed to a room's owner or members
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RoomEvent {
    /// Sent to the owner after a join or leave, with the full member list
    #[serde(rename_all = "camelCase")]
    MembersUpdated { room_id: String, members: Vec<Session> },

    /// Sent to every member when the room is deleted
    #[serde(rename_all = "camelCase")]
    RoomClosed { room_id: String },
}

impl RoomEvent {
    /// Get the event name as it appears on the wire
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MembersUpdated { .. } => "membersUpdated",
            Self::RoomClosed { .. } => "roomClosed",
        }
    }

    #[must_use]
    pub fn to_frame(&self) -> OutboundFrame {
        OutboundFrame::json(self)
    }
}
