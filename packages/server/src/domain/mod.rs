//! Domain layer for the messaging and notification core.
//!
//! This module contains business rules that are independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod membership;
pub mod publisher;
pub mod repository;
pub mod value_object;

pub use entity::{Message, NewMessage, NewNotification, Notification};
pub use error::{RepositoryError, ValueObjectError};
pub use event::{ClientEvent, ServerEvent};
pub use factory::ConnectionIdFactory;
pub use membership::RoomMembership;
pub use publisher::EventPublisher;
pub use repository::{MessageRepository, NotificationRepository, UserDirectory};
pub use value_object::{
    ConnectionId, MessageContent, MessageId, NotificationId, NotificationKind, NotificationText,
    RoomName, Timestamp, UserId,
};
