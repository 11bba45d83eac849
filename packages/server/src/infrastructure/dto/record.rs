//! JSON shapes of persisted records, shared by HTTP responses and
//! WebSocket event payloads.

use linkup_shared::time::timestamp_to_rfc3339;
use serde::{Deserialize, Serialize};

use crate::domain::{Message, Notification};

/// Message record (`isRead` is 0/1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub timestamp: String, // RFC 3339
    pub is_read: u8,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.value(),
            sender_id: message.sender_id.value(),
            receiver_id: message.receiver_id.value(),
            content: message.content.as_str().to_string(),
            timestamp: timestamp_to_rfc3339(message.timestamp.value()),
            is_read: u8::from(message.is_read),
        }
    }
}

/// Notification record (`isRead` is 0/1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub from_user_id: Option<i64>,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub is_read: u8,
    pub created_at: String, // RFC 3339
}

impl From<&Notification> for NotificationDto {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.value(),
            user_id: notification.user_id.value(),
            kind: notification.kind.as_str().to_string(),
            message: notification.message.as_str().to_string(),
            from_user_id: notification.from_user_id.map(|id| id.value()),
            post_id: notification.post_id,
            comment_id: notification.comment_id,
            is_read: u8::from(notification.is_read),
            created_at: timestamp_to_rfc3339(notification.created_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MessageContent, MessageId, NotificationId, NotificationKind, NotificationText, Timestamp,
        UserId,
    };

    #[test]
    fn test_message_dto_json_shape() {
        // テスト項目: メッセージは camelCase・isRead 0/1 で出力される
        // given (前提条件):
        let message = Message {
            id: MessageId::new(501),
            sender_id: UserId::new(1).unwrap(),
            receiver_id: UserId::new(2).unwrap(),
            content: MessageContent::new("hi".to_string()).unwrap(),
            timestamp: Timestamp::new(1_672_498_800_000),
            is_read: false,
        };

        // when (操作):
        let json = serde_json::to_value(MessageDto::from(&message)).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "id": 501,
                "senderId": 1,
                "receiverId": 2,
                "content": "hi",
                "timestamp": "2022-12-31T15:00:00.000Z",
                "isRead": 0
            })
        );
    }

    #[test]
    fn test_notification_dto_json_shape() {
        // テスト項目: 通知は type フィールドと null 許容の関連 ID を持つ
        // given (前提条件):
        let notification = Notification {
            id: NotificationId::new(9),
            user_id: UserId::new(2).unwrap(),
            kind: NotificationKind::FriendRequest,
            message: NotificationText::new("Ada sent you a friend request.".to_string())
                .unwrap(),
            from_user_id: Some(UserId::new(1).unwrap()),
            post_id: None,
            comment_id: None,
            is_read: true,
            created_at: Timestamp::new(0),
        };

        // when (操作):
        let json = serde_json::to_value(NotificationDto::from(&notification)).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "friend_request");
        assert_eq!(json["userId"], 2);
        assert_eq!(json["fromUserId"], 1);
        assert!(json["postId"].is_null());
        assert_eq!(json["isRead"], 1);
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00.000Z");
    }
}
