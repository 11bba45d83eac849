//! UseCase: 通知一覧の取得と既読化

use std::sync::Arc;

use crate::domain::{Notification, NotificationId, NotificationRepository, UserId};

use super::error::InboxError;

/// 通知受信箱のユースケース
pub struct NotificationInboxUseCase {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationInboxUseCase {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Notifications of `user_id`, newest first
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Notification>, InboxError> {
        Ok(self.notifications.list_for_user(user_id).await?)
    }

    pub async fn mark_read(&self, id: NotificationId) -> Result<(), InboxError> {
        if self.notifications.mark_read(id).await? {
            Ok(())
        } else {
            Err(InboxError::NotFound(id.value()))
        }
    }

    /// Returns how many notifications changed state
    pub async fn mark_all_read(&self, user_id: UserId) -> Result<usize, InboxError> {
        let updated = self.notifications.mark_all_read(user_id).await?;
        tracing::debug!("Marked {} notification(s) of {} as read", updated, user_id);
        Ok(updated)
    }
}
