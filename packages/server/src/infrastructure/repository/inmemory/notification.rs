//! InMemory Notification Repository 実装

use async_trait::async_trait;
use linkup_shared::time::now_millis;
use tokio::sync::Mutex;

use crate::domain::{
    NewNotification, Notification, NotificationId, NotificationRepository, RepositoryError,
    Timestamp, UserId,
};

#[derive(Default)]
struct NotificationTable {
    rows: Vec<Notification>,
    last_id: i64,
}

/// インメモリ Notification Repository 実装
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    table: Mutex<NotificationTable>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, RepositoryError> {
        let mut table = self.table.lock().await;
        table.last_id += 1;
        let stored = Notification {
            id: NotificationId::new(table.last_id),
            user_id: notification.user_id,
            kind: notification.kind,
            message: notification.message,
            from_user_id: notification.from_user_id,
            post_id: notification.post_id,
            comment_id: notification.comment_id,
            is_read: false,
            created_at: Timestamp::new(now_millis()),
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Notification>, RepositoryError> {
        let table = self.table.lock().await;
        // newest first; rows are stored oldest first
        Ok(table
            .rows
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: NotificationId) -> Result<bool, RepositoryError> {
        let mut table = self.table.lock().await;
        match table.rows.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: UserId) -> Result<usize, RepositoryError> {
        let mut table = self.table.lock().await;
        let mut updated = 0;
        for notification in table
            .rows
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }
}
