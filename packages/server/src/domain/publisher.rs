//! Event publishing abstraction used by the use-case layer.

#[cfg(test)]
use mockall::automock;

use super::{
    event::ServerEvent,
    value_object::{ConnectionId, UserId},
};

/// Pushes server events to live connections.
///
/// Delivery is best effort: publishing never fails and never waits for the
/// client. The returned counts are the number of connections the event was
/// handed to.
#[cfg_attr(test, automock)]
pub trait EventPublisher: Send + Sync {
    /// Deliver to every connection in the user's room
    fn emit_to_user(&self, user_id: UserId, event: &ServerEvent) -> usize;

    /// Deliver to the rooms of all `user_ids`
    fn emit_to_users(&self, user_ids: &[UserId], event: &ServerEvent) -> usize {
        user_ids
            .iter()
            .map(|user_id| self.emit_to_user(*user_id, event))
            .sum()
    }

    /// Deliver to a single connection regardless of room membership
    fn emit_to_connection(&self, connection_id: ConnectionId, event: &ServerEvent) -> bool;
}
