//! Event Fan-out Engine
//!
//! Resolves the addressed room through the [`RoomRegistry`] and hands the
//! serialized frame to every member's outbound queue. Queues are unbounded,
//! so publishing never waits on a slow client. A member whose queue is
//! closed (its socket is being torn down) is skipped silently.

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, EventPublisher, ServerEvent, UserId},
    infrastructure::dto::websocket::encode_server_event,
};

use super::registry::RoomRegistry;

/// [`EventPublisher`] backed by the in-process room registry
pub struct RoomFanout {
    registry: Arc<RoomRegistry>,
}

impl RoomFanout {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    fn encode(event: &ServerEvent) -> Option<String> {
        match encode_server_event(event) {
            Ok(frame) => Some(frame),
            Err(e) => {
                tracing::error!("Failed to encode '{}' event: {}", event.name(), e);
                None
            }
        }
    }
}

impl EventPublisher for RoomFanout {
    fn emit_to_user(&self, user_id: UserId, event: &ServerEvent) -> usize {
        let members = self.registry.members_of(user_id);
        if members.is_empty() {
            tracing::debug!("No live connection for user {}, dropping '{}'", user_id, event.name());
            return 0;
        }

        let Some(frame) = Self::encode(event) else {
            return 0;
        };

        let mut delivered = 0;
        for member in members {
            if member.sender.send(frame.clone()).is_ok() {
                delivered += 1;
            } else {
                tracing::debug!(
                    "Connection '{}' is closing, skipped '{}' for user {}",
                    member.connection_id,
                    event.name(),
                    user_id
                );
            }
        }
        delivered
    }

    fn emit_to_connection(&self, connection_id: ConnectionId, event: &ServerEvent) -> bool {
        let Some(sender) = self.registry.sender_of(connection_id) else {
            tracing::debug!("Connection '{}' is gone, dropping '{}'", connection_id, event.name());
            return false;
        };
        let Some(frame) = Self::encode(event) else {
            return false;
        };
        sender.send(frame).is_ok()
    }
}
