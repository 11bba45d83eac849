//! Room Registry
//!
//! Tracks every live connection together with its outbound queue and the
//! set of `user-<id>` rooms it belongs to. One instance is created at
//! startup and shared through `Arc`.
//!
//! Operations never await: the state sits behind a `std::sync::Mutex`
//! and every critical section is a handful of map updates.

use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
};

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{ConnectionId, RoomMembership, RoomName, Timestamp, UserId};

/// A connection resolved from a room, ready to receive frames
#[derive(Debug, Clone)]
pub struct RoomMember {
    pub connection_id: ConnectionId,
    pub sender: UnboundedSender<String>,
}

/// Registry entry for one live connection
struct ConnectionEntry {
    /// Outbound frame queue drained by the connection's send task
    sender: UnboundedSender<String>,
    rooms: HashSet<RoomName>,
    connected_at: Timestamp,
}

#[derive(Default)]
struct RegistryState {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    /// Only non-empty rooms are present
    rooms: HashMap<RoomName, HashSet<ConnectionId>>,
}

impl RegistryState {
    fn remove_from_room(&mut self, room: &RoomName, connection_id: ConnectionId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(&connection_id);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
    }
}

/// In-process room registry
#[derive(Default)]
pub struct RoomRegistry {
    state: Mutex<RegistryState>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a freshly accepted connection with no rooms.
    ///
    /// Re-registering an id replaces its queue and keeps its rooms.
    pub fn connect(
        &self,
        connection_id: ConnectionId,
        sender: UnboundedSender<String>,
        connected_at: Timestamp,
    ) {
        let mut state = self.state();
        match state.connections.get_mut(&connection_id) {
            Some(entry) => entry.sender = sender,
            None => {
                state.connections.insert(
                    connection_id,
                    ConnectionEntry {
                        sender,
                        rooms: HashSet::new(),
                        connected_at,
                    },
                );
            }
        }
    }

    /// Connections currently in the user's room (possibly none)
    pub fn members_of(&self, user_id: UserId) -> Vec<RoomMember> {
        let state = self.state();
        let room = RoomName::for_user(user_id);
        let Some(members) = state.rooms.get(&room) else {
            return Vec::new();
        };

        members
            .iter()
            .filter_map(|connection_id| {
                state
                    .connections
                    .get(connection_id)
                    .map(|entry| RoomMember {
                        connection_id: *connection_id,
                        sender: entry.sender.clone(),
                    })
            })
            .collect()
    }

    /// Outbound queue of a single connection
    pub fn sender_of(&self, connection_id: ConnectionId) -> Option<UnboundedSender<String>> {
        self.state()
            .connections
            .get(&connection_id)
            .map(|entry| entry.sender.clone())
    }

    /// When the connection was registered
    pub fn connected_at(&self, connection_id: ConnectionId) -> Option<Timestamp> {
        self.state()
            .connections
            .get(&connection_id)
            .map(|entry| entry.connected_at)
    }

    pub fn connection_count(&self) -> usize {
        self.state().connections.len()
    }

    /// Number of non-empty rooms
    pub fn room_count(&self) -> usize {
        self.state().rooms.len()
    }
}

impl RoomMembership for RoomRegistry {
    fn join(&self, connection_id: ConnectionId, user_id: UserId) -> bool {
        let mut state = self.state();
        let room = RoomName::for_user(user_id);

        let Some(entry) = state.connections.get_mut(&connection_id) else {
            return false;
        };
        if !entry.rooms.insert(room.clone()) {
            return false;
        }

        state.rooms.entry(room).or_default().insert(connection_id);
        true
    }

    fn leave_room(&self, connection_id: ConnectionId, user_id: UserId) -> bool {
        let mut state = self.state();
        let room = RoomName::for_user(user_id);

        let removed = state
            .connections
            .get_mut(&connection_id)
            .is_some_and(|entry| entry.rooms.remove(&room));
        if removed {
            state.remove_from_room(&room, connection_id);
        }
        removed
    }

    fn leave(&self, connection_id: ConnectionId) -> usize {
        let mut state = self.state();
        let Some(entry) = state.connections.remove(&connection_id) else {
            return 0;
        };

        for room in &entry.rooms {
            state.remove_from_room(room, connection_id);
        }
        entry.rooms.len()
    }
}
