//! JoinRoom handler (1)

use super::HandlerResult;
use crate::connection::Session;
use crate::protocol::{JoinRoomPayload, OutboundFrame};
use crate::rooms::RoomRegistry;

/// Handles JoinRoom messages
pub struct JoinRoomHandler;

impl JoinRoomHandler {
    /// Join the sender to a room and answer with the room snapshot
    ///
    /// The snapshot carries the owner, so the joiner learns who runs the room.
    pub async fn handle(
        registry: &RoomRegistry,
        session: &mut Session,
        payload: JoinRoomPayload,
    ) -> HandlerResult<OutboundFrame> {
        let room = registry.join_room(&payload.room_id, session).await?;
        Ok(OutboundFrame::json(&room))
    }
}
