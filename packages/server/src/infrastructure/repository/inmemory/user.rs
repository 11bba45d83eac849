//! InMemory User Directory 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, UserDirectory, UserId};

/// インメモリ User Directory 実装
#[derive(Default)]
pub struct InMemoryUserDirectory {
    names: Mutex<HashMap<UserId, String>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or rename a user
    pub async fn insert(&self, user_id: UserId, display_name: impl Into<String>) {
        self.names.lock().await.insert(user_id, display_name.into());
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn display_name(&self, user_id: UserId) -> Result<Option<String>, RepositoryError> {
        Ok(self.names.lock().await.get(&user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_display_name_lookup() {
        // テスト項目: 登録済みユーザーの表示名を取得でき、未登録は None
        // given (前提条件):
        let directory = InMemoryUserDirectory::new();
        let ada = UserId::new(1).unwrap();
        directory.insert(ada, "Ada Lovelace").await;

        // then (期待する結果):
        assert_eq!(
            directory.display_name(ada).await.unwrap(),
            Some("Ada Lovelace".to_string())
        );
        assert_eq!(
            directory.display_name(UserId::new(2).unwrap()).await.unwrap(),
            None
        );
    }
}
