//! UseCase: 新規会話判定
//!
//! A just-sent message opens a "new conversation" when at most one other
//! message has ever been exchanged between the pair. Only "more than one"
//! matters, so the count stops at [`PRIOR_MESSAGE_CAP`].
//!
//! The check runs after the insert and is not serialized per pair: two
//! concurrent first messages may both report a new conversation.

use std::sync::Arc;

use crate::domain::{MessageId, MessageRepository, RepositoryError, UserId};

/// Upper bound for the prior-message count
pub const PRIOR_MESSAGE_CAP: usize = 2;

/// 会話の新規性を判定する
pub struct ConversationAggregator {
    messages: Arc<dyn MessageRepository>,
}

impl ConversationAggregator {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// Whether `just_inserted` is the first or second message between `a` and `b`
    pub async fn is_new_conversation(
        &self,
        a: UserId,
        b: UserId,
        just_inserted: MessageId,
    ) -> Result<bool, RepositoryError> {
        let prior = self
            .messages
            .count_between(a, b, just_inserted, PRIOR_MESSAGE_CAP)
            .await?;
        Ok(prior <= 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, NewMessage, repository::MockMessageRepository};
    use crate::infrastructure::repository::InMemoryMessageRepository;

    fn user(id: i64) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn send(repo: &InMemoryMessageRepository, sender: i64, receiver: i64) -> MessageId {
        repo.insert(NewMessage::new(
            user(sender),
            user(receiver),
            MessageContent::new("hi".to_string()).unwrap(),
        ))
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_first_second_and_third_message() {
        // テスト項目: 1・2 通目は新規会話、3 通目以降は新規会話ではない
        // given (前提条件):
        let repo = Arc::new(InMemoryMessageRepository::new());
        let aggregator = ConversationAggregator::new(repo.clone());

        // when (操作) / then (期待する結果):
        let first = send(&repo, 1, 2).await;
        assert!(aggregator.is_new_conversation(user(1), user(2), first).await.unwrap());

        let second = send(&repo, 2, 1).await;
        assert!(aggregator.is_new_conversation(user(2), user(1), second).await.unwrap());

        let third = send(&repo, 1, 2).await;
        assert!(!aggregator.is_new_conversation(user(1), user(2), third).await.unwrap());
    }

    #[tokio::test]
    async fn test_other_pairs_do_not_count() {
        // テスト項目: 他のユーザーとのメッセージは数に含まれない
        let repo = Arc::new(InMemoryMessageRepository::new());
        let aggregator = ConversationAggregator::new(repo.clone());
        send(&repo, 1, 3).await;
        send(&repo, 3, 1).await;
        send(&repo, 2, 3).await;

        let id = send(&repo, 1, 2).await;

        assert!(aggregator.is_new_conversation(user(1), user(2), id).await.unwrap());
    }

    #[tokio::test]
    async fn test_count_query_uses_cap_and_excludes_inserted() {
        // テスト項目: 上限 2 と挿入済み ID の除外で件数を問い合わせる
        // given (前提条件):
        let mut repo = MockMessageRepository::new();
        repo.expect_count_between()
            .withf(|a, b, excluding, limit| {
                a.value() == 1 && b.value() == 2 && excluding.value() == 10 && *limit == 2
            })
            .times(1)
            .returning(|_, _, _, _| Ok(2));
        let aggregator = ConversationAggregator::new(Arc::new(repo));

        // when (操作):
        let result = aggregator
            .is_new_conversation(user(1), user(2), MessageId::new(10))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(false));
    }

    #[tokio::test]
    async fn test_store_failure_is_returned() {
        // テスト項目: ストアのエラーはそのまま返される
        let mut repo = MockMessageRepository::new();
        repo.expect_count_between()
            .returning(|_, _, _, _| Err(RepositoryError::Storage("down".to_string())));
        let aggregator = ConversationAggregator::new(Arc::new(repo));

        let result = aggregator
            .is_new_conversation(user(1), user(2), MessageId::new(1))
            .await;

        assert_eq!(result, Err(RepositoryError::Storage("down".to_string())));
    }
}
