//! InMemory Message Repository 実装

use async_trait::async_trait;
use linkup_shared::time::now_millis;
use tokio::sync::Mutex;

use crate::domain::{
    Message, MessageId, MessageRepository, NewMessage, RepositoryError, Timestamp, UserId,
};

#[derive(Default)]
struct MessageTable {
    rows: Vec<Message>,
    last_id: i64,
}

/// インメモリ Message Repository 実装
///
/// Rows are kept in insertion order, which is also id and timestamp order.
#[derive(Default)]
pub struct InMemoryMessageRepository {
    table: Mutex<MessageTable>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn insert(&self, message: NewMessage) -> Result<Message, RepositoryError> {
        let mut table = self.table.lock().await;
        table.last_id += 1;
        let stored = Message {
            id: MessageId::new(table.last_id),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content,
            timestamp: Timestamp::new(now_millis()),
            is_read: false,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_between(
        &self,
        user_id: UserId,
        contact_id: UserId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .iter()
            .filter(|m| m.is_between(user_id, contact_id))
            .cloned()
            .collect())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Message>, RepositoryError> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .iter()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect())
    }

    async fn count_between(
        &self,
        a: UserId,
        b: UserId,
        excluding: MessageId,
        limit: usize,
    ) -> Result<usize, RepositoryError> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .iter()
            .filter(|m| m.id != excluding && m.is_between(a, b))
            .take(limit)
            .count())
    }

    async fn mark_read(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<usize, RepositoryError> {
        let mut table = self.table.lock().await;
        let mut updated = 0;
        for message in table
            .rows
            .iter_mut()
            .filter(|m| m.sender_id == sender_id && m.receiver_id == receiver_id && !m.is_read)
        {
            message.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }
}
