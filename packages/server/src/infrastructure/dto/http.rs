//! HTTP API request and response DTOs.

use serde::{Deserialize, Serialize};

use super::WireUserId;

/// Body of `PUT /api/messages/markAsRead`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAsReadRequest {
    pub sender_id: Option<WireUserId>,
    pub receiver_id: Option<WireUserId>,
}

/// Result of a bulk read-state update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedDto {
    pub updated: usize,
}

/// Body of `POST /api/notifications`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub user_id: Option<WireUserId>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
    pub from_user_id: Option<WireUserId>,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessageDto {
    pub message: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
