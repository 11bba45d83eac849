//! SQLite User Directory 実装

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::OptionalExtension;

use super::Database;
use crate::domain::{RepositoryError, UserDirectory, UserId};

/// Reads display names from the `users` table.
pub struct SqliteUserDirectory {
    db: Arc<Database>,
}

impl SqliteUserDirectory {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn display_name(&self, user_id: UserId) -> Result<Option<String>, RepositoryError> {
        self.db
            .with_conn(move |conn| {
                let name = conn
                    .query_row(
                        "SELECT first_name || ' ' || last_name FROM users WHERE id = ?1",
                        [user_id.value()],
                        |row| row.get::<_, String>(0),
                    )
                    .optional()?;
                Ok(name)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_display_name_concatenates_first_and_last() {
        // テスト項目: 表示名は「名 姓」で返り、未登録ユーザーは None
        // given (前提条件):
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.with_conn_blocking(|conn| {
            conn.execute(
                "INSERT INTO users (first_name, last_name) VALUES ('Ada', 'Lovelace')",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        let directory = SqliteUserDirectory::new(db);

        // when (操作):
        let known = directory.display_name(UserId::new(1).unwrap()).await.unwrap();
        let unknown = directory.display_name(UserId::new(2).unwrap()).await.unwrap();

        // then (期待する結果):
        assert_eq!(known, Some("Ada Lovelace".to_string()));
        assert_eq!(unknown, None);
    }
}
