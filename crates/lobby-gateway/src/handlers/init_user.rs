//! InitUser handler (3)

use super::HandlerResult;
use crate::connection::Session;
use crate::protocol::{InitUserPayload, OutboundFrame};

/// Handles InitUser messages
pub struct InitUserHandler;

impl InitUserHandler {
    /// Store the peer's opaque attribute on its canonical session
    pub fn handle(session: &mut Session, payload: InitUserPayload) -> HandlerResult<OutboundFrame> {
        tracing::debug!(session_id = %session.id(), "User attribute set");

        session.set_attribute(payload.attribute);
        Ok(OutboundFrame::empty())
    }
}
