//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod conversation;
pub mod create_notification;
pub mod error;
pub mod membership;
pub mod message_history;
pub mod notification_inbox;
pub mod read_receipt;
pub mod send_message;

pub use conversation::ConversationAggregator;
pub use create_notification::{CreateNotificationUseCase, NotificationDraft};
pub use error::{CreateNotificationError, InboxError, SendMessageError};
pub use membership::RoomMembershipUseCase;
pub use message_history::MessageHistoryUseCase;
pub use notification_inbox::NotificationInboxUseCase;
pub use read_receipt::ReadReceiptUseCase;
pub use send_message::{SendMessageOutcome, SendMessageUseCase};
