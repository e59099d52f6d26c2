//! Message handlers
//!
//! Routes each decoded envelope to the handler for its message type.

mod error;
mod init_user;
mod join_room;
mod leave_room;
mod new_room;

pub use error::{HandlerError, HandlerResult};
pub use init_user::InitUserHandler;
pub use join_room::JoinRoomHandler;
pub use leave_room::LeaveRoomHandler;
pub use new_room::NewRoomHandler;

use crate::connection::Session;
use crate::protocol::{Envelope, MessageType, OutboundFrame};
use crate::rooms::RoomRegistry;
use serde::de::DeserializeOwned;

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle an incoming client message
    ///
    /// Always yields exactly one frame: the handler's response, or the error it
    /// failed with.
    pub async fn handle(
        registry: &RoomRegistry,
        session: &mut Session,
        envelope: Envelope,
    ) -> OutboundFrame {
        match Self::dispatch(registry, session, envelope).await {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!(
                    session_id = %session.id(),
                    error = %e,
                    action = e.action(),
                    "Handler error"
                );
                e.to_frame()
            }
        }
    }

    /// Decode the payload for the envelope's tag and run its handler
    ///
    /// The handler receives the connection's canonical session, so whatever it changes
    /// is what later messages on the same connection see.
    pub async fn dispatch(
        registry: &RoomRegistry,
        session: &mut Session,
        envelope: Envelope,
    ) -> HandlerResult<OutboundFrame> {
        let Some(message_type) = envelope.message_type() else {
            tracing::debug!(
                session_id = %session.id(),
                type_name = envelope.type_name,
                "Unknown message type"
            );
            return Err(HandlerError::UnknownMessageFormat);
        };

        tracing::debug!(
            session_id = %session.id(),
            message_type = %message_type,
            "Dispatching message"
        );

        match message_type {
            MessageType::NewRoom => {
                NewRoomHandler::handle(registry, session, Self::decode(&envelope)?)
            }
            MessageType::JoinRoom => {
                JoinRoomHandler::handle(registry, session, Self::decode(&envelope)?).await
            }
            MessageType::LeaveRoom => {
                LeaveRoomHandler::handle(registry, session, Self::decode(&envelope)?).await
            }
            MessageType::InitUser => InitUserHandler::handle(session, Self::decode(&envelope)?),
        }
    }

    fn decode<T: DeserializeOwned>(envelope: &Envelope) -> HandlerResult<T> {
        envelope
            .payload_as()
            .map_err(|e| HandlerError::MalformedPayload(e.to_string()))
    }
}
