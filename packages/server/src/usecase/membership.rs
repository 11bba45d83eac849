//! UseCase: ルーム参加・ログアウト・切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomMembership, UserId};

/// ルームメンバーシップのユースケース
pub struct RoomMembershipUseCase {
    membership: Arc<dyn RoomMembership>,
}

impl RoomMembershipUseCase {
    pub fn new(membership: Arc<dyn RoomMembership>) -> Self {
        Self { membership }
    }

    /// `join`: associate the connection with the user's room
    pub fn join(&self, connection_id: ConnectionId, user_id: UserId) {
        if self.membership.join(connection_id, user_id) {
            tracing::info!("Connection '{}' joined room user-{}", connection_id, user_id);
        } else {
            tracing::debug!(
                "Connection '{}' already in room user-{} (or gone)",
                connection_id,
                user_id
            );
        }
    }

    /// `logout`: detach the connection from the user's room, keeping the
    /// transport open
    pub fn logout(&self, connection_id: ConnectionId, user_id: UserId) {
        if self.membership.leave_room(connection_id, user_id) {
            tracing::info!("Connection '{}' logged out of user-{}", connection_id, user_id);
        }
    }

    /// Transport disconnect: leave every room
    pub fn disconnect(&self, connection_id: ConnectionId) {
        let rooms = self.membership.leave(connection_id);
        tracing::info!(
            "Connection '{}' disconnected, removed from {} room(s)",
            connection_id,
            rooms
        );
    }
}
