//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// Errors from sending a direct message
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// The message could not be stored; nothing was broadcast
    #[error("Failed to persist message: {0}")]
    Persistence(#[from] RepositoryError),
}

/// Errors from creating a notification
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateNotificationError {
    /// Neither explicit text nor an origin user to compose it from
    #[error("Missing message or fromUserId")]
    MissingText,

    #[error("Invalid notification text: {0}")]
    InvalidText(ValueObjectError),

    /// The notification could not be stored; nothing was emitted
    #[error("Failed to persist notification: {0}")]
    Persistence(#[from] RepositoryError),
}

/// Errors from reading or updating a user's notification inbox
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InboxError {
    #[error("Notification {0} not found")]
    NotFound(i64),

    #[error("Failed to access notifications: {0}")]
    Persistence(#[from] RepositoryError),
}
