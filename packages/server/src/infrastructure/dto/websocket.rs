//! WebSocket frame DTOs.
//!
//! Every frame is a JSON text frame of the form
//! `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};

use super::{
    FieldError, WireUserId,
    record::{MessageDto, NotificationDto},
    require_user_id,
};
use crate::domain::{ClientEvent, MessageContent, NewMessage, ServerEvent, ValueObjectError};

/// Inbound frame as sent by clients
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientFrame {
    Join(UserPayload),
    SendMessage(SendMessagePayload),
    ReadMessages(ReadMessagesPayload),
    Logout(UserPayload),
}

/// `join` / `logout` payload: `{"userId": 1}` or a bare id
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserPayload {
    Bare(WireUserId),
    Object {
        #[serde(rename = "userId")]
        user_id: Option<WireUserId>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub sender_id: Option<WireUserId>,
    pub receiver_id: Option<WireUserId>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadMessagesPayload {
    pub sender_id: Option<WireUserId>,
    pub receiver_id: Option<WireUserId>,
}

/// Why an inbound frame was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Not JSON, unknown event name, or wrong payload shape
    #[error("Malformed event: {0}")]
    Malformed(String),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("Invalid content: {0}")]
    Content(ValueObjectError),
}

impl UserPayload {
    fn into_user_id(self) -> Result<crate::domain::UserId, FieldError> {
        match self {
            UserPayload::Bare(id) => require_user_id(Some(id), "userId"),
            UserPayload::Object { user_id } => require_user_id(user_id, "userId"),
        }
    }
}

impl TryFrom<ClientFrame> for ClientEvent {
    type Error = FrameError;

    fn try_from(frame: ClientFrame) -> Result<Self, Self::Error> {
        let event = match frame {
            ClientFrame::Join(payload) => ClientEvent::Join {
                user_id: payload.into_user_id()?,
            },
            ClientFrame::Logout(payload) => ClientEvent::Logout {
                user_id: payload.into_user_id()?,
            },
            ClientFrame::SendMessage(payload) => {
                let sender_id = require_user_id(payload.sender_id, "senderId")?;
                let receiver_id = require_user_id(payload.receiver_id, "receiverId")?;
                let content = payload
                    .content
                    .ok_or(FieldError::Missing("content"))?;
                let content = MessageContent::new(content).map_err(FrameError::Content)?;
                ClientEvent::SendMessage(NewMessage::new(sender_id, receiver_id, content))
            }
            ClientFrame::ReadMessages(payload) => ClientEvent::ReadMessages {
                sender_id: require_user_id(payload.sender_id, "senderId")?,
                reader_id: require_user_id(payload.receiver_id, "receiverId")?,
            },
        };
        Ok(event)
    }
}

/// Parse and validate one inbound text frame
pub fn parse_client_event(text: &str) -> Result<ClientEvent, FrameError> {
    let frame: ClientFrame =
        serde_json::from_str(text).map_err(|e| FrameError::Malformed(e.to_string()))?;
    ClientEvent::try_from(frame)
}

/// Outbound frame envelope
#[derive(Debug, Clone, Serialize)]
pub struct ServerFrame<T> {
    pub event: &'static str,
    pub data: T,
}

/// `messagesRead` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesReadDto {
    pub by: i64,
}

/// `error` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub message: String,
}

fn encode<T: Serialize>(event: &'static str, data: T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerFrame { event, data })
}

/// Serialize a server event into its wire frame
pub fn encode_server_event(event: &ServerEvent) -> Result<String, serde_json::Error> {
    let name = event.name();
    match event {
        ServerEvent::ReceiveMessage(message)
        | ServerEvent::MessageSent(message)
        | ServerEvent::NewConversation(message) => encode(name, MessageDto::from(message)),
        ServerEvent::MessagesRead { by } => encode(name, MessagesReadDto { by: by.value() }),
        ServerEvent::Notification(notification) => {
            encode(name, NotificationDto::from(notification))
        }
        ServerEvent::Error { message } => encode(
            name,
            ErrorDto {
                message: message.clone(),
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    #[test]
    fn test_parse_join_with_object_payload() {
        // テスト項目: {"userId": n} 形式の join を解釈できる
        let event = parse_client_event(r#"{"event":"join","data":{"userId":4}}"#).unwrap();

        assert_eq!(
            event,
            ClientEvent::Join {
                user_id: UserId::new(4).unwrap()
            }
        );
    }

    #[test]
    fn test_parse_join_with_bare_id() {
        // テスト項目: ID だけの join ペイロード（数値・文字列）を解釈できる
        let from_number = parse_client_event(r#"{"event":"join","data":4}"#).unwrap();
        let from_text = parse_client_event(r#"{"event":"join","data":"4"}"#).unwrap();

        let expected = ClientEvent::Join {
            user_id: UserId::new(4).unwrap(),
        };
        assert_eq!(from_number, expected);
        assert_eq!(from_text, expected);
    }

    #[test]
    fn test_parse_send_message() {
        // テスト項目: sendMessage を NewMessage に変換できる
        // when (操作):
        let event = parse_client_event(
            r#"{"event":"sendMessage","data":{"senderId":1,"receiverId":2,"content":"hi"}}"#,
        )
        .unwrap();

        // then (期待する結果):
        let ClientEvent::SendMessage(new_message) = event else {
            panic!("expected sendMessage, got {event:?}");
        };
        assert_eq!(new_message.sender_id.value(), 1);
        assert_eq!(new_message.receiver_id.value(), 2);
        assert_eq!(new_message.content.as_str(), "hi");
    }

    #[test]
    fn test_parse_send_message_missing_receiver() {
        // テスト項目: 必須フィールド欠落は Missing エラーになる
        let result =
            parse_client_event(r#"{"event":"sendMessage","data":{"senderId":1,"content":"hi"}}"#);

        assert_eq!(
            result,
            Err(FrameError::Field(FieldError::Missing("receiverId")))
        );
    }

    #[test]
    fn test_parse_send_message_empty_content() {
        // テスト項目: 空のメッセージ本文は Content エラーになる
        let result = parse_client_event(
            r#"{"event":"sendMessage","data":{"senderId":1,"receiverId":2,"content":""}}"#,
        );

        assert_eq!(
            result,
            Err(FrameError::Content(ValueObjectError::MessageContentEmpty))
        );
    }

    #[test]
    fn test_parse_read_messages_maps_receiver_to_reader() {
        // テスト項目: readMessages の receiverId は既読にしたユーザーとして扱われる
        let event =
            parse_client_event(r#"{"event":"readMessages","data":{"senderId":1,"receiverId":2}}"#)
                .unwrap();

        assert_eq!(
            event,
            ClientEvent::ReadMessages {
                sender_id: UserId::new(1).unwrap(),
                reader_id: UserId::new(2).unwrap(),
            }
        );
    }

    #[test]
    fn test_parse_unknown_event_is_malformed() {
        // テスト項目: 未知のイベント名や JSON でない入力は Malformed になる
        assert!(matches!(
            parse_client_event(r#"{"event":"dance","data":{}}"#),
            Err(FrameError::Malformed(_))
        ));
        assert!(matches!(
            parse_client_event("hello"),
            Err(FrameError::Malformed(_))
        ));
    }

    #[test]
    fn test_encode_messages_read() {
        // テスト項目: messagesRead イベントは {by} ペイロードで出力される
        let event = ServerEvent::MessagesRead {
            by: UserId::new(2).unwrap(),
        };

        let json: serde_json::Value =
            serde_json::from_str(&encode_server_event(&event).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"event": "messagesRead", "data": {"by": 2}})
        );
    }

    #[test]
    fn test_encode_error() {
        // テスト項目: error イベントは {message} ペイロードで出力される
        let event = ServerEvent::error("Failed to send message.");

        let json: serde_json::Value =
            serde_json::from_str(&encode_server_event(&event).unwrap()).unwrap();

        assert_eq!(json["event"], "error");
        assert_eq!(json["data"]["message"], "Failed to send message.");
    }
}
