//! Room registry error types

use thiserror::Error;

/// Action label for a failed join
pub const ACTION_JOIN: &str = "room joining";
/// Action label for a failed leave
pub const ACTION_LEAVE: &str = "room leaving";
/// Action label for a failed delete
pub const ACTION_DELETE: &str = "room deleting";
/// Action label for a failed create
pub const ACTION_CREATE: &str = "room creation";

/// Membership protocol failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("room already exists")]
    AlreadyExists,

    #[error("room not found")]
    NotFound { action: &'static str },

    #[error("user already in room")]
    UserAlreadyInRoom,

    #[error("user not in room")]
    UserNotInRoom,

    #[error("room is full")]
    RoomFull,
}

impl RoomError {
    /// The operation that failed, as reported to the peer
    pub fn action(&self) -> &'static str {
        match self {
            Self::AlreadyExists => ACTION_CREATE,
            Self::NotFound { action } => action,
            Self::UserAlreadyInRoom | Self::RoomFull => ACTION_JOIN,
            Self::UserNotInRoom => ACTION_LEAVE,
        }
    }
}
