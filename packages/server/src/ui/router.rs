//! Route table.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handler, state::AppState};

/// Build the application router over shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handler::health_check))
        .route("/api/messages/markAsRead", put(handler::mark_messages_read))
        .route(
            "/api/messages/{user_id}/{contact_id}",
            get(handler::get_messages),
        )
        .route("/api/notifications", post(handler::create_notification))
        .route(
            "/api/notifications/{user_id}",
            get(handler::get_notifications),
        )
        .route(
            "/api/notifications/read/{id}",
            patch(handler::mark_notification_read),
        )
        .route(
            "/api/notifications/readAll/{user_id}",
            patch(handler::mark_all_notifications_read),
        )
        .route("/ws", get(handler::websocket_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
