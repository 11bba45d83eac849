//! UseCase: 既読通知（messagesRead）の配信
//!
//! Only relays the receipt. Persisting read state is the separate
//! `PUT /api/messages/markAsRead` call; the two are not transactional.

use std::sync::Arc;

use crate::domain::{EventPublisher, ServerEvent, UserId};

/// 既読通知のユースケース
pub struct ReadReceiptUseCase {
    publisher: Arc<dyn EventPublisher>,
}

impl ReadReceiptUseCase {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    /// Tell `sender_id` that `reader_id` has read their messages.
    /// Returns the number of connections notified.
    pub fn execute(&self, sender_id: UserId, reader_id: UserId) -> usize {
        self.publisher
            .emit_to_user(sender_id, &ServerEvent::MessagesRead { by: reader_id })
    }
}
