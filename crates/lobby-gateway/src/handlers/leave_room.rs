//! LeaveRoom handler (2)

use super::HandlerResult;
use crate::connection::Session;
use crate::protocol::{LeaveRoomPayload, OutboundFrame};
use crate::rooms::RoomRegistry;

/// Handles LeaveRoom messages
pub struct LeaveRoomHandler;

impl LeaveRoomHandler {
    pub async fn handle(
        registry: &RoomRegistry,
        session: &mut Session,
        payload: LeaveRoomPayload,
    ) -> HandlerResult<OutboundFrame> {
        registry.leave_room(&payload.room_id, session).await?;
        Ok(OutboundFrame::empty())
    }
}
