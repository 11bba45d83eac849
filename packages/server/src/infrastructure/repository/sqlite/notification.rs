//! SQLite Notification Repository 実装

use std::sync::Arc;

use async_trait::async_trait;
use linkup_shared::time::now_millis;
use rusqlite::{OptionalExtension, Row, params};

use super::Database;
use crate::domain::{
    NewNotification, Notification, NotificationId, NotificationKind, NotificationRepository,
    NotificationText, RepositoryError, Timestamp, UserId,
};

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, type, message, from_user_id, post_id, comment_id, is_read, created_at";

/// Raw `notifications` row
struct NotificationRow {
    id: i64,
    user_id: i64,
    kind: String,
    message: String,
    from_user_id: Option<i64>,
    post_id: Option<i64>,
    comment_id: Option<i64>,
    is_read: bool,
    created_at: i64,
}

impl NotificationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            kind: row.get(2)?,
            message: row.get(3)?,
            from_user_id: row.get(4)?,
            post_id: row.get(5)?,
            comment_id: row.get(6)?,
            is_read: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}

impl TryFrom<NotificationRow> for Notification {
    type Error = RepositoryError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: NotificationId::new(row.id),
            user_id: UserId::new(row.user_id)?,
            kind: row.kind.parse::<NotificationKind>()?,
            message: NotificationText::new(row.message)?,
            from_user_id: row.from_user_id.map(UserId::new).transpose()?,
            post_id: row.post_id,
            comment_id: row.comment_id,
            is_read: row.is_read,
            created_at: Timestamp::new(row.created_at),
        })
    }
}

/// SQLite Notification Repository 実装
pub struct SqliteNotificationRepository {
    db: Arc<Database>,
}

impl SqliteNotificationRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepository {
    async fn insert(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, RepositoryError> {
        self.db
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO notifications
                         (user_id, type, message, from_user_id, post_id, comment_id, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        notification.user_id.value(),
                        notification.kind.as_str(),
                        notification.message.as_str(),
                        notification.from_user_id.map(|id| id.value()),
                        notification.post_id,
                        notification.comment_id,
                        now_millis()
                    ],
                )?;
                let id = conn.last_insert_rowid();

                let row = conn
                    .query_row(
                        &format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = ?1"),
                        [id],
                        NotificationRow::from_row,
                    )
                    .optional()?
                    .ok_or(RepositoryError::MissingAfterInsert(id))?;
                Notification::try_from(row)
            })
            .await
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Notification>, RepositoryError> {
        self.db
            .with_conn(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {NOTIFICATION_COLUMNS} FROM notifications
                     WHERE user_id = ?1
                     ORDER BY created_at DESC, id DESC"
                ))?;
                let rows = stmt
                    .query_map([user_id.value()], NotificationRow::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows.into_iter().map(Notification::try_from).collect()
            })
            .await
    }

    async fn mark_read(&self, id: NotificationId) -> Result<bool, RepositoryError> {
        self.db
            .with_conn(move |conn| {
                let updated = conn.execute(
                    "UPDATE notifications SET is_read = 1 WHERE id = ?1",
                    [id.value()],
                )?;
                Ok(updated > 0)
            })
            .await
    }

    async fn mark_all_read(&self, user_id: UserId) -> Result<usize, RepositoryError> {
        self.db
            .with_conn(move |conn| {
                let updated = conn.execute(
                    "UPDATE notifications SET is_read = 1 WHERE user_id = ?1 AND is_read = 0",
                    [user_id.value()],
                )?;
                Ok(updated)
            })
            .await
    }
}
