//! UseCase: メッセージ履歴の取得と既読化

use std::sync::Arc;

use crate::domain::{Message, MessageRepository, RepositoryError, UserId};

/// メッセージ履歴のユースケース
pub struct MessageHistoryUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl MessageHistoryUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// Messages between `user_id` and `contact_id`, or every message of
    /// `user_id` when no contact is given. Oldest first.
    pub async fn fetch(
        &self,
        user_id: UserId,
        contact_id: Option<UserId>,
    ) -> Result<Vec<Message>, RepositoryError> {
        match contact_id {
            Some(contact_id) => self.messages.list_between(user_id, contact_id).await,
            None => self.messages.list_for_user(user_id).await,
        }
    }

    /// Bulk mark-as-read of what `sender_id` sent to `receiver_id`.
    ///
    /// Idempotent: a second call finds nothing unread and returns 0.
    pub async fn mark_read(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<usize, RepositoryError> {
        let updated = self.messages.mark_read(sender_id, receiver_id).await?;
        tracing::debug!(
            "Marked {} message(s) from {} to {} as read",
            updated,
            sender_id,
            receiver_id
        );
        Ok(updated)
    }
}
