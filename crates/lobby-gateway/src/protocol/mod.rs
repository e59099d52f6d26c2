//! Wire protocol definitions
//!
//! Message type tags, the client envelope, payload shapes, and transport frames.

mod envelope;
mod frames;
mod message_type;
mod payloads;

pub use envelope::Envelope;
pub use frames::{ErrorFrame, FrameKind, OutboundFrame};
pub use message_type::MessageType;
pub use payloads::{InitUserPayload, JoinRoomPayload, LeaveRoomPayload, NewRoomPayload};
