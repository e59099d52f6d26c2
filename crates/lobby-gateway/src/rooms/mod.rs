//! Rooms and the room registry

mod error;
mod registry;
mod room;

pub use error::{RoomError, ACTION_CREATE, ACTION_DELETE, ACTION_JOIN, ACTION_LEAVE};
pub use registry::RoomRegistry;
pub use room::Room;
