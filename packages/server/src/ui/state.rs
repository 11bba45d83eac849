//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{EventPublisher, MessageRepository, NotificationRepository, UserDirectory},
    infrastructure::{
        realtime::{RoomFanout, RoomRegistry},
        repository::{
            Database, InMemoryMessageRepository, InMemoryNotificationRepository,
            InMemoryUserDirectory, SqliteMessageRepository, SqliteNotificationRepository,
            SqliteUserDirectory,
        },
    },
};

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub messages: Arc<dyn MessageRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub users: Arc<dyn UserDirectory>,
    /// Live connections and their rooms
    pub registry: Arc<RoomRegistry>,
    /// Fan-out over `registry`
    pub publisher: Arc<dyn EventPublisher>,
}

impl AppState {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let publisher = Arc::new(RoomFanout::new(registry.clone()));
        Self {
            messages,
            notifications,
            users,
            registry,
            publisher,
        }
    }

    /// State backed by a SQLite database
    pub fn sqlite(db: Arc<Database>) -> Self {
        Self::new(
            Arc::new(SqliteMessageRepository::new(db.clone())),
            Arc::new(SqliteNotificationRepository::new(db.clone())),
            Arc::new(SqliteUserDirectory::new(db)),
        )
    }

    /// State backed by the in-memory repositories
    pub fn in_memory(users: Arc<InMemoryUserDirectory>) -> Self {
        Self::new(
            Arc::new(InMemoryMessageRepository::new()),
            Arc::new(InMemoryNotificationRepository::new()),
            users,
        )
    }
}
