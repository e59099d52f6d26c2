//! NewRoom handler (0)

use super::HandlerResult;
use crate::connection::Session;
use crate::protocol::{NewRoomPayload, OutboundFrame};
use crate::rooms::RoomRegistry;

/// Handles NewRoom messages
pub struct NewRoomHandler;

impl NewRoomHandler {
    /// Create a room owned by the sender and answer with the new room
    pub fn handle(
        registry: &RoomRegistry,
        session: &mut Session,
        payload: NewRoomPayload,
    ) -> HandlerResult<OutboundFrame> {
        let room = registry.create_room(&payload.room_id, payload.max_members, session)?;
        Ok(OutboundFrame::json(&room))
    }
}
