//! Core domain models for messaging and notifications.

use serde::{Deserialize, Serialize};

use super::value_object::{
    MessageContent, MessageId, NotificationId, NotificationKind, NotificationText, Timestamp,
    UserId,
};

/// A direct message as persisted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Store-assigned identifier
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: MessageContent,
    /// Store-assigned send time
    pub timestamp: Timestamp,
    pub is_read: bool,
}

impl Message {
    /// Whether the message was exchanged between `a` and `b` in either direction
    pub fn is_between(&self, a: UserId, b: UserId) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }

    /// Whether `user_id` sent or received the message
    pub fn involves(&self, user_id: UserId) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}

/// A message that has been validated but not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: MessageContent,
}

impl NewMessage {
    pub fn new(sender_id: UserId, receiver_id: UserId, content: MessageContent) -> Self {
        Self {
            sender_id,
            receiver_id,
            content,
        }
    }
}

/// A notification as persisted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    /// Owner: the user the notification is addressed to
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub message: NotificationText,
    /// User whose action triggered the notification
    pub from_user_id: Option<UserId>,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// A notification that has been validated but not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub message: NotificationText,
    pub from_user_id: Option<UserId>,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
}
