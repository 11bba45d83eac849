//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    domain::{NotificationId, NotificationKind, UserId},
    infrastructure::dto::{
        http::{CreateNotificationRequest, MarkAsReadRequest, StatusMessageDto, UpdatedDto},
        record::{MessageDto, NotificationDto},
        require_user_id,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{
        CreateNotificationUseCase, MessageHistoryUseCase, NotificationDraft,
        NotificationInboxUseCase,
    },
};

/// `contactId` value meaning "every conversation"
const ALL_CONTACTS: &str = "0";

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Message history between a user and a contact (or all of the user's
/// messages when `contactId` is 0)
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Path((user_id, contact_id)): Path<(String, String)>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let user_id: UserId = user_id.parse()?;
    let contact_id = match contact_id.trim() {
        ALL_CONTACTS => None,
        other => Some(other.parse::<UserId>()?),
    };

    let messages = MessageHistoryUseCase::new(state.messages.clone())
        .fetch(user_id, contact_id)
        .await?;

    Ok(Json(messages.iter().map(MessageDto::from).collect()))
}

/// Bulk mark-as-read of messages from `senderId` to `receiverId`
pub async fn mark_messages_read(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MarkAsReadRequest>, JsonRejection>,
) -> Result<Json<UpdatedDto>, ApiError> {
    let Json(request) = body?;
    let sender_id = require_user_id(request.sender_id, "senderId")?;
    let receiver_id = require_user_id(request.receiver_id, "receiverId")?;

    let updated = MessageHistoryUseCase::new(state.messages.clone())
        .mark_read(sender_id, receiver_id)
        .await?;

    Ok(Json(UpdatedDto { updated }))
}

/// Notifications of a user, newest first
pub async fn get_notifications(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<NotificationDto>>, ApiError> {
    let user_id: UserId = user_id.parse()?;

    let notifications = NotificationInboxUseCase::new(state.notifications.clone())
        .list(user_id)
        .await?;

    Ok(Json(notifications.iter().map(NotificationDto::from).collect()))
}

/// Create a notification and push it to the owner's live connections
pub async fn create_notification(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateNotificationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NotificationDto>), ApiError> {
    let Json(request) = body?;
    let user_id = require_user_id(request.user_id, "userId")?;
    let kind = request
        .kind
        .ok_or_else(|| ApiError::BadRequest("Missing type".to_string()))?
        .parse::<NotificationKind>()?;
    let from_user_id = request
        .from_user_id
        .map(|id| require_user_id(Some(id), "fromUserId"))
        .transpose()?;

    let draft = NotificationDraft {
        user_id,
        kind,
        message: request.message,
        from_user_id,
        post_id: request.post_id,
        comment_id: request.comment_id,
    };

    let notification = CreateNotificationUseCase::new(
        state.notifications.clone(),
        state.users.clone(),
        state.publisher.clone(),
    )
    .execute(draft)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(NotificationDto::from(&notification)),
    ))
}

/// Mark one notification read
pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StatusMessageDto>, ApiError> {
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid notification id: {id}")))?;

    NotificationInboxUseCase::new(state.notifications.clone())
        .mark_read(NotificationId::new(id))
        .await?;

    Ok(Json(StatusMessageDto {
        message: "Notification marked as read".to_string(),
    }))
}

/// Mark every unread notification of a user read
pub async fn mark_all_notifications_read(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UpdatedDto>, ApiError> {
    let user_id: UserId = user_id.parse()?;

    let updated = NotificationInboxUseCase::new(state.notifications.clone())
        .mark_all_read(user_id)
        .await?;

    Ok(Json(UpdatedDto { updated }))
}
