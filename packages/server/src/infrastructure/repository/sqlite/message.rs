//! SQLite Message Repository 実装

use std::sync::Arc;

use async_trait::async_trait;
use linkup_shared::time::now_millis;
use rusqlite::{OptionalExtension, Row, params};

use super::Database;
use crate::domain::{
    Message, MessageContent, MessageId, MessageRepository, NewMessage, RepositoryError,
    Timestamp, UserId,
};

const MESSAGE_COLUMNS: &str = "id, sender_id, receiver_id, content, timestamp, is_read";

/// Raw `messages` row
struct MessageRow {
    id: i64,
    sender_id: i64,
    receiver_id: i64,
    content: String,
    timestamp: i64,
    is_read: bool,
}

impl MessageRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            sender_id: row.get(1)?,
            receiver_id: row.get(2)?,
            content: row.get(3)?,
            timestamp: row.get(4)?,
            is_read: row.get(5)?,
        })
    }
}

impl TryFrom<MessageRow> for Message {
    type Error = RepositoryError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Message {
            id: MessageId::new(row.id),
            sender_id: UserId::new(row.sender_id)?,
            receiver_id: UserId::new(row.receiver_id)?,
            content: MessageContent::new(row.content)?,
            timestamp: Timestamp::new(row.timestamp),
            is_read: row.is_read,
        })
    }
}

fn collect_messages(
    conn: &rusqlite::Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Message>, RepositoryError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, MessageRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(Message::try_from).collect()
}

/// SQLite Message Repository 実装
pub struct SqliteMessageRepository {
    db: Arc<Database>,
}

impl SqliteMessageRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn insert(&self, message: NewMessage) -> Result<Message, RepositoryError> {
        self.db
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO messages (sender_id, receiver_id, content, timestamp) VALUES (?1, ?2, ?3, ?4)",
                    params![
                        message.sender_id.value(),
                        message.receiver_id.value(),
                        message.content.as_str(),
                        now_millis()
                    ],
                )?;
                let id = conn.last_insert_rowid();

                // read back what the store actually holds
                let row = conn
                    .query_row(
                        &format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?1"),
                        [id],
                        MessageRow::from_row,
                    )
                    .optional()?
                    .ok_or(RepositoryError::MissingAfterInsert(id))?;
                Message::try_from(row)
            })
            .await
    }

    async fn list_between(
        &self,
        user_id: UserId,
        contact_id: UserId,
    ) -> Result<Vec<Message>, RepositoryError> {
        self.db
            .with_conn(move |conn| {
                collect_messages(
                    conn,
                    &format!(
                        "SELECT {MESSAGE_COLUMNS} FROM messages
                         WHERE (sender_id = ?1 AND receiver_id = ?2)
                            OR (sender_id = ?2 AND receiver_id = ?1)
                         ORDER BY timestamp ASC, id ASC"
                    ),
                    params![user_id.value(), contact_id.value()],
                )
            })
            .await
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Message>, RepositoryError> {
        self.db
            .with_conn(move |conn| {
                collect_messages(
                    conn,
                    &format!(
                        "SELECT {MESSAGE_COLUMNS} FROM messages
                         WHERE sender_id = ?1 OR receiver_id = ?1
                         ORDER BY timestamp ASC, id ASC"
                    ),
                    params![user_id.value()],
                )
            })
            .await
    }

    async fn count_between(
        &self,
        a: UserId,
        b: UserId,
        excluding: MessageId,
        limit: usize,
    ) -> Result<usize, RepositoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.db
            .with_conn(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM (
                         SELECT id FROM messages
                         WHERE ((sender_id = ?1 AND receiver_id = ?2)
                             OR (sender_id = ?2 AND receiver_id = ?1))
                           AND id != ?3
                         LIMIT ?4
                     )",
                    params![a.value(), b.value(), excluding.value(), limit],
                    |row| row.get(0),
                )?;
                Ok(usize::try_from(count).unwrap_or_default())
            })
            .await
    }

    async fn mark_read(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<usize, RepositoryError> {
        self.db
            .with_conn(move |conn| {
                let updated = conn.execute(
                    "UPDATE messages SET is_read = 1
                     WHERE sender_id = ?1 AND receiver_id = ?2 AND is_read = 0",
                    params![sender_id.value(), receiver_id.value()],
                )?;
                Ok(updated)
            })
            .await
    }
}
