//! Room values

use super::RoomError;
use crate::connection::Session;
use serde::Serialize;
use uuid::Uuid;

/// A named group of sessions with an owner
///
/// `members` keeps join order, never contains the owner, and never holds two
/// sessions with the same id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    room_id: String,
    max_members: u32,
    owner: Session,
    members: Vec<Session>,
}

impl Room {
    pub(crate) fn new(room_id: String, max_members: u32, owner: Session) -> Self {
        Self {
            room_id,
            max_members,
            owner,
            members: Vec::new(),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn max_members(&self) -> u32 {
        self.max_members
    }

    pub fn owner(&self) -> &Session {
        &self.owner
    }

    pub fn members(&self) -> &[Session] {
        &self.members
    }

    pub fn member_ids(&self) -> Vec<Uuid> {
        self.members.iter().map(Session::id).collect()
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner.id() == user_id
    }

    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.members.iter().any(|m| m.id() == user_id)
    }

    /// Whether another member would exceed capacity; zero capacity is unbounded
    pub fn is_full(&self) -> bool {
        self.max_members > 0 && self.members.len() >= self.max_members as usize
    }

    pub(crate) fn add_member(&mut self, user: Session) -> Result<(), RoomError> {
        if self.is_owned_by(user.id()) || self.has_member(user.id()) {
            return Err(RoomError::UserAlreadyInRoom);
        }
        if self.is_full() {
            return Err(RoomError::RoomFull);
        }

        self.members.push(user);
        Ok(())
    }

    pub(crate) fn remove_member(&mut self, user_id: Uuid) -> Result<Session, RoomError> {
        let index = self
            .members
            .iter()
            .position(|m| m.id() == user_id)
            .ok_or(RoomError::UserNotInRoom)?;

        Ok(self.members.remove(index))
    }

    pub(crate) fn into_members(self) -> Vec<Session> {
        self.members
    }
}
