//! LinkUp messaging and notification server.
//!
//! Persists direct messages and notifications, and pushes real-time events
//! to every WebSocket connection joined to the addressed user's room.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{build_router, run, state::AppState};
