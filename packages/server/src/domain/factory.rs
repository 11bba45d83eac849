//! Domain factories for creating identifiers.

use super::ConnectionId;

/// Factory for generating ConnectionId instances.
///
/// Keeps id generation separate from the ConnectionId value object.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}
