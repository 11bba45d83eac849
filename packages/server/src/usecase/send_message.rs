//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 永続化 → receiveMessage → messageSent → newConversation の順序
//!
//! ### なぜこのテストが必要か
//! - 永続化に失敗したメッセージがブロードキャストされないことを保証
//! - 送信者自身の接続にも receiveMessage が届くことを確認
//! - 新規会話判定が 1・2 通目のみ newConversation を発行することを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：送受信者の両方がオンライン
//! - エッジケース：受信者がオフライン（配信 0 件でも成功）
//! - 異常系：永続化失敗、会話判定クエリの失敗

use std::sync::Arc;

use crate::domain::{
    ConnectionId, EventPublisher, Message, MessageRepository, NewMessage, ServerEvent,
};

use super::{conversation::ConversationAggregator, error::SendMessageError};

/// Result of a successful send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageOutcome {
    /// The persisted record that was broadcast
    pub message: Message,
    /// Connections that were handed `receiveMessage`
    pub delivered: usize,
    pub new_conversation: bool,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    messages: Arc<dyn MessageRepository>,
    publisher: Arc<dyn EventPublisher>,
    conversations: ConversationAggregator,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(messages: Arc<dyn MessageRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        let conversations = ConversationAggregator::new(messages.clone());
        Self {
            messages,
            publisher,
            conversations,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `origin` - 送信リクエストを発行した接続
    /// * `new_message` - 検証済みのメッセージ
    ///
    /// # Returns
    ///
    /// * `Ok(SendMessageOutcome)` - 永続化とブロードキャストの結果
    /// * `Err(SendMessageError)` - 永続化失敗（ブロードキャストは行われない）
    pub async fn execute(
        &self,
        origin: ConnectionId,
        new_message: NewMessage,
    ) -> Result<SendMessageOutcome, SendMessageError> {
        let sender_id = new_message.sender_id;
        let receiver_id = new_message.receiver_id;

        // 1. 永続化（失敗したら何も配信しない）
        let message = self.messages.insert(new_message).await?;

        // 2. 受信者・送信者の両方のルームへ配信
        let delivered = self.publisher.emit_to_users(
            &[receiver_id, sender_id],
            &ServerEvent::ReceiveMessage(message.clone()),
        );

        // 3. 送信元の接続へ確認応答
        self.publisher
            .emit_to_connection(origin, &ServerEvent::MessageSent(message.clone()));

        // 4. 新規会話なら送信者のルームへ通知
        let new_conversation = match self
            .conversations
            .is_new_conversation(sender_id, receiver_id, message.id)
            .await
        {
            Ok(is_new) => is_new,
            Err(e) => {
                tracing::warn!(
                    "Conversation check failed for message {}: {}",
                    message.id.value(),
                    e
                );
                false
            }
        };
        if new_conversation {
            self.publisher
                .emit_to_user(sender_id, &ServerEvent::NewConversation(message.clone()));
        }

        tracing::info!(
            "Message {} from {} to {} delivered to {} connection(s)",
            message.id.value(),
            sender_id,
            receiver_id,
            delivered
        );

        Ok(SendMessageOutcome {
            message,
            delivered,
            new_conversation,
        })
    }
}
