//! SQLite repository implementations
//!
//! A single `rusqlite::Connection` guarded by a mutex, shared by the
//! message, notification and user repositories. Repository calls run on the
//! blocking pool so a slow query never stalls the async workers.

pub mod message;
mod migrations;
pub mod notification;
pub mod user;

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::domain::RepositoryError;

pub use message::SqliteMessageRepository;
pub use notification::SqliteNotificationRepository;
pub use user::SqliteUserDirectory;

/// Path value that selects a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        RepositoryError::Storage(err.to_string())
    }
}

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database file and run migrations.
    ///
    /// `:memory:` opens a private in-memory database.
    pub fn open(path: &Path) -> Result<Self, RepositoryError> {
        let conn = if path.as_os_str() == IN_MEMORY_PATH {
            Connection::open_in_memory()?
        } else {
            let conn = Connection::open(path)?;
            // WAL mode for concurrent readers
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn
        };
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        tracing::info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        Self::open(Path::new(IN_MEMORY_PATH))
    }

    /// Run `f` on the blocking pool with the connection locked
    pub async fn with_conn<F, T>(self: &Arc<Self>, f: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&Connection) -> Result<T, RepositoryError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(self);
        tokio::task::spawn_blocking(move || db.with_conn_blocking(f))
            .await
            .map_err(|e| RepositoryError::Storage(format!("DB task failed: {e}")))?
    }

    /// Run `f` on the calling thread with the connection locked
    pub fn with_conn_blocking<F, T>(&self, f: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&Connection) -> Result<T, RepositoryError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::Storage(format!("DB lock poisoned: {e}")))?;
        f(&conn)
    }
}
