//! Real-time events exchanged with connected clients.
//!
//! Inbound frames are validated into [`ClientEvent`] at the transport
//! boundary; everything the server pushes is a [`ServerEvent`].

use super::{
    entity::{Message, NewMessage, Notification},
    value_object::UserId,
};

/// Events a client may send over the real-time channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Associate the connection with a user's room
    Join { user_id: UserId },
    /// Persist a direct message and fan it out
    SendMessage(NewMessage),
    /// `reader_id` has read what `sender_id` sent them
    ReadMessages { sender_id: UserId, reader_id: UserId },
    /// Detach the connection from a user's room
    Logout { user_id: UserId },
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Join { .. } => "join",
            ClientEvent::SendMessage(_) => "sendMessage",
            ClientEvent::ReadMessages { .. } => "readMessages",
            ClientEvent::Logout { .. } => "logout",
        }
    }
}

/// Events the server pushes to connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    ReceiveMessage(Message),
    MessageSent(Message),
    NewConversation(Message),
    MessagesRead { by: UserId },
    Notification(Notification),
    Error { message: String },
}

impl ServerEvent {
    /// Event name on the wire
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::ReceiveMessage(_) => "receiveMessage",
            ServerEvent::MessageSent(_) => "messageSent",
            ServerEvent::NewConversation(_) => "newConversation",
            ServerEvent::MessagesRead { .. } => "messagesRead",
            ServerEvent::Notification(_) => "notification",
            ServerEvent::Error { .. } => "error",
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }
}
