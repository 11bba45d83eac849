//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{
    create_notification, get_messages, get_notifications, health_check,
    mark_all_notifications_read, mark_messages_read, mark_notification_read,
};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
