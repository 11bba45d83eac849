//! Room membership abstraction.

#[cfg(test)]
use mockall::automock;

use super::value_object::{ConnectionId, UserId};

/// Associates live connections with per-user rooms.
///
/// All operations are total: unknown connections and empty rooms are
/// no-ops, never errors.
#[cfg_attr(test, automock)]
pub trait RoomMembership: Send + Sync {
    /// Add the connection to the user's room. Returns false if it was
    /// already a member or the connection is not registered.
    fn join(&self, connection_id: ConnectionId, user_id: UserId) -> bool;

    /// Remove the connection from one user's room.
    fn leave_room(&self, connection_id: ConnectionId, user_id: UserId) -> bool;

    /// Remove the connection from every room and forget it. Returns the
    /// number of rooms it was removed from.
    fn leave(&self, connection_id: ConnectionId) -> usize;
}
