//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId must be a positive integer
    #[error("UserId must be a positive integer (got {0})")]
    UserIdNotPositive(i64),

    /// UserId given as text that is not an integer
    #[error("UserId must be numeric (got: {0})")]
    UserIdInvalidFormat(String),

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} bytes (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    /// NotificationText validation error
    #[error("NotificationText cannot be empty")]
    NotificationTextEmpty,

    /// NotificationText too long error
    #[error("NotificationText cannot exceed {max} bytes (got {actual})")]
    NotificationTextTooLong { max: usize, actual: usize },

    /// Unknown notification type
    #[error("Invalid notification type: {0}")]
    NotificationKindUnknown(String),
}

/// Errors returned by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store rejected or failed the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// A row read back from the store does not form a valid domain value
    #[error("Corrupted record: {0}")]
    Corrupted(String),

    /// A just-inserted record could not be read back
    #[error("Record not found after insert: id {0}")]
    MissingAfterInsert(i64),
}

impl From<ValueObjectError> for RepositoryError {
    fn from(err: ValueObjectError) -> Self {
        RepositoryError::Corrupted(err.to_string())
    }
}
