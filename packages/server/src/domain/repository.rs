//! Repository traits
//!
//! The domain layer defines these abstractions; the infrastructure layer
//! provides the in-memory and SQLite implementations (dependency inversion).

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{
    entity::{Message, NewMessage, NewNotification, Notification},
    error::RepositoryError,
    value_object::{MessageId, NotificationId, UserId},
};

/// Persistent store for direct messages.
///
/// Ids and timestamps are assigned by the store on insert, and a successful
/// insert is immediately visible to subsequent reads.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a message and return the stored record
    async fn insert(&self, message: NewMessage) -> Result<Message, RepositoryError>;

    /// Messages exchanged between `user_id` and `contact_id`, oldest first
    async fn list_between(
        &self,
        user_id: UserId,
        contact_id: UserId,
    ) -> Result<Vec<Message>, RepositoryError>;

    /// Messages sent or received by `user_id`, oldest first
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Message>, RepositoryError>;

    /// Count messages between `a` and `b` (either direction), skipping
    /// `excluding`, stopping once `limit` is reached
    async fn count_between(
        &self,
        a: UserId,
        b: UserId,
        excluding: MessageId,
        limit: usize,
    ) -> Result<usize, RepositoryError>;

    /// Mark every unread message from `sender_id` to `receiver_id` as read.
    /// Returns the number of messages that changed state.
    async fn mark_read(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<usize, RepositoryError>;
}

/// Persistent store for notifications.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a notification and return the stored record
    async fn insert(&self, notification: NewNotification)
    -> Result<Notification, RepositoryError>;

    /// Notifications owned by `user_id`, newest first
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Notification>, RepositoryError>;

    /// Mark one notification read. Returns false when it does not exist.
    async fn mark_read(&self, id: NotificationId) -> Result<bool, RepositoryError>;

    /// Mark all unread notifications of `user_id` read; returns how many changed
    async fn mark_all_read(&self, user_id: UserId) -> Result<usize, RepositoryError>;
}

/// Read-only view of the user directory.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Display name ("First Last") of the user, if the user exists
    async fn display_name(&self, user_id: UserId) -> Result<Option<String>, RepositoryError>;
}
