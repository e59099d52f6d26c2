//! Room registry
//!
//! Process-wide mapping from room id to room. Every public method runs its whole
//! check-then-act sequence under a single lock, and notifications are delivered only
//! after that lock is released. Delivery never waits on a peer's queue.

use super::{Room, RoomError, ACTION_DELETE, ACTION_JOIN, ACTION_LEAVE};
use crate::connection::Session;
use crate::events::RoomEvent;
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

/// An event computed under the lock, addressed to one session
struct Notification {
    recipient: Session,
    event: RoomEvent,
}

/// Concurrency-guarded room map that owns all membership invariants
pub struct RoomRegistry {
    rooms: Mutex<HashMap<String, Room>>,
}

impl RoomRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Create an empty registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Create a room owned by `owner`
    ///
    /// An empty `room_id` is replaced by a generated one. On success the owner's
    /// canonical record is marked as a room owner and a snapshot of the new room is
    /// returned. Nobody is notified.
    ///
    /// A session that already owns a room may create more. `remove_user` deletes all
    /// of them when the owner disconnects.
    pub fn create_room(
        &self,
        room_id: &str,
        max_members: u32,
        owner: &mut Session,
    ) -> Result<Room, RoomError> {
        let room_id = if room_id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            room_id.to_string()
        };

        let room = {
            let mut rooms = self.rooms.lock();
            let entry = match rooms.entry(room_id) {
                Entry::Occupied(_) => return Err(RoomError::AlreadyExists),
                Entry::Vacant(entry) => entry,
            };

            owner.set_room_owner(true);
            let room = Room::new(entry.key().clone(), max_members, owner.clone());
            entry.insert(room.clone());
            room
        };

        tracing::info!(
            room_id = %room.room_id(),
            owner_id = %owner.id(),
            max_members = max_members,
            "Room created"
        );

        Ok(room)
    }

    /// Add `user` to a room's members and push the new member list to the owner
    pub async fn join_room(&self, room_id: &str, user: &Session) -> Result<Room, RoomError> {
        let (snapshot, notification) = {
            let mut rooms = self.rooms.lock();
            let room = rooms
                .get_mut(room_id)
                .ok_or(RoomError::NotFound { action: ACTION_JOIN })?;

            room.add_member(user.clone())?;
            (room.clone(), Self::members_updated(room))
        };

        tracing::debug!(
            room_id = %room_id,
            user_id = %user.id(),
            members = snapshot.members().len(),
            "User joined room"
        );

        Self::deliver(vec![notification]);
        Ok(snapshot)
    }

    /// Remove `user` from a room's members and push the new member list to the owner
    pub async fn leave_room(&self, room_id: &str, user: &Session) -> Result<(), RoomError> {
        let notification = {
            let mut rooms = self.rooms.lock();
            let room = rooms
                .get_mut(room_id)
                .ok_or(RoomError::NotFound { action: ACTION_LEAVE })?;

            room.remove_member(user.id())?;
            Self::members_updated(room)
        };

        tracing::debug!(room_id = %room_id, user_id = %user.id(), "User left room");

        Self::deliver(vec![notification]);
        Ok(())
    }

    /// Remove a room and tell each of its members that it is closed
    pub async fn delete_room(&self, room_id: &str) -> Result<(), RoomError> {
        let room = self
            .rooms
            .lock()
            .remove(room_id)
            .ok_or(RoomError::NotFound {
                action: ACTION_DELETE,
            })?;

        tracing::info!(
            room_id = %room_id,
            members = room.members().len(),
            "Room deleted"
        );

        Self::deliver(Self::room_closed(room));
        Ok(())
    }

    /// Disconnect cleanup
    ///
    /// Deletes every room `user` owns, then removes `user` from every room it is a
    /// member of. Rooms the user is absent from are left untouched.
    pub async fn remove_user(&self, user: &Session) {
        let notifications = {
            let mut rooms = self.rooms.lock();
            let mut notifications = Vec::new();

            let owned: Vec<String> = rooms
                .values()
                .filter(|room| room.is_owned_by(user.id()))
                .map(|room| room.room_id().to_string())
                .collect();

            for room_id in owned {
                if let Some(room) = rooms.remove(&room_id) {
                    tracing::info!(
                        room_id = %room_id,
                        owner_id = %user.id(),
                        "Room deleted after owner disconnect"
                    );
                    notifications.extend(Self::room_closed(room));
                }
            }

            for room in rooms.values_mut() {
                if room.remove_member(user.id()).is_ok() {
                    notifications.push(Self::members_updated(room));
                }
            }

            notifications
        };

        Self::deliver(notifications);
    }

    /// Get a snapshot of a room
    pub fn get_room(&self, room_id: &str) -> Option<Room> {
        self.rooms.lock().get(room_id).cloned()
    }

    /// Check if a room exists
    pub fn contains_room(&self, room_id: &str) -> bool {
        self.rooms.lock().contains_key(room_id)
    }

    /// Get the number of live rooms
    pub fn room_count(&self) -> usize {
        self.rooms.lock().len()
    }

    fn members_updated(room: &Room) -> Notification {
        Notification {
            recipient: room.owner().clone(),
            event: RoomEvent::MembersUpdated {
                room_id: room.room_id().to_string(),
                members: room.members().to_vec(),
            },
        }
    }

    fn room_closed(room: Room) -> Vec<Notification> {
        let room_id = room.room_id().to_string();
        room.into_members()
            .into_iter()
            .map(|member| Notification {
                recipient: member,
                event: RoomEvent::RoomClosed {
                    room_id: room_id.clone(),
                },
            })
            .collect()
    }

    /// Queue each notification without waiting; a full or closed queue drops it
    fn deliver(notifications: Vec<Notification>) {
        for Notification { recipient, event } in notifications {
            let reason = match recipient.try_send(event.to_frame()) {
                Ok(()) => continue,
                Err(TrySendError::Full(_)) => "queue full",
                Err(TrySendError::Closed(_)) => "peer is gone",
            };
            tracing::warn!(
                session_id = %recipient.id(),
                event = event.name(),
                reason = reason,
                "Dropped room notification"
            );
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomRegistry")
            .field("rooms", &self.room_count())
            .finish()
    }
}
