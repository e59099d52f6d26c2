//! Server-pushed events
//!
//! Notifications the registry sends to peers other than the one whose request caused them.

mod room_events;

pub use room_events::RoomEvent;
