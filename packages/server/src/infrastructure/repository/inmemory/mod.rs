//! InMemory repository implementations
//!
//! Used by tests and by `--ephemeral` runs. Each table is a `Vec` behind a
//! `tokio::sync::Mutex`.

pub mod message;
pub mod notification;
pub mod user;

pub use message::InMemoryMessageRepository;
pub use notification::InMemoryNotificationRepository;
pub use user::InMemoryUserDirectory;
