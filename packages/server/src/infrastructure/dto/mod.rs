//! Data transfer objects for the HTTP API and the WebSocket channel.

pub mod http;
pub mod record;
pub mod websocket;

use serde::Deserialize;

use crate::domain::{UserId, ValueObjectError};

/// A user id as clients send it: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireUserId {
    Number(i64),
    Text(String),
}

impl TryFrom<WireUserId> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: WireUserId) -> Result<Self, Self::Error> {
        match value {
            WireUserId::Number(id) => UserId::new(id),
            WireUserId::Text(text) => text.parse(),
        }
    }
}

/// Convert an optional wire id, naming the field when it is absent.
pub fn require_user_id(
    value: Option<WireUserId>,
    field: &'static str,
) -> Result<UserId, FieldError> {
    let value = value.ok_or(FieldError::Missing(field))?;
    UserId::try_from(value).map_err(|source| FieldError::Invalid { field, source })
}

/// Boundary validation failure for a single field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Missing {0}")]
    Missing(&'static str),

    #[error("Invalid {field}: {source}")]
    Invalid {
        field: &'static str,
        source: ValueObjectError,
    },
}
