//! UseCase: 通知作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateNotificationUseCase::execute() メソッド
//! - 本文の決定（明示指定 > 発生元ユーザー名からの合成 > エラー）
//!
//! ### なぜこのテストが必要か
//! - 本文の合成ルールは種別ごとに固定の文言を持つ
//! - 永続化に失敗した通知が配信されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：明示的な本文、発生元ユーザー名からの合成
//! - エッジケース：発生元ユーザーが存在しない（"Someone" で合成）
//! - 異常系：本文も発生元も無い、永続化失敗

use std::sync::Arc;

use crate::domain::{
    EventPublisher, NewNotification, Notification, NotificationKind, NotificationRepository,
    NotificationText, ServerEvent, UserDirectory, UserId,
};

use super::error::CreateNotificationError;

/// Display name used when the origin user is not in the directory
pub const UNKNOWN_ACTOR_NAME: &str = "Someone";

/// Validated input for creating a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub user_id: UserId,
    pub kind: NotificationKind,
    /// Explicit text; composed from `from_user_id` when absent
    pub message: Option<String>,
    pub from_user_id: Option<UserId>,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
}

/// 通知作成のユースケース
pub struct CreateNotificationUseCase {
    notifications: Arc<dyn NotificationRepository>,
    users: Arc<dyn UserDirectory>,
    publisher: Arc<dyn EventPublisher>,
}

impl CreateNotificationUseCase {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserDirectory>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            notifications,
            users,
            publisher,
        }
    }

    /// 通知を作成して所有者のルームへ配信
    ///
    /// # Returns
    ///
    /// * `Ok(Notification)` - 永続化された通知
    /// * `Err(CreateNotificationError)` - 本文の決定または永続化に失敗（配信なし）
    pub async fn execute(
        &self,
        draft: NotificationDraft,
    ) -> Result<Notification, CreateNotificationError> {
        let text = self.resolve_text(&draft).await?;

        let notification = self
            .notifications
            .insert(NewNotification {
                user_id: draft.user_id,
                kind: draft.kind,
                message: text,
                from_user_id: draft.from_user_id,
                post_id: draft.post_id,
                comment_id: draft.comment_id,
            })
            .await?;

        let delivered = self.publisher.emit_to_user(
            notification.user_id,
            &ServerEvent::Notification(notification.clone()),
        );
        tracing::info!(
            "Notification {} ({}) for user {} delivered to {} connection(s)",
            notification.id.value(),
            notification.kind,
            notification.user_id,
            delivered
        );

        Ok(notification)
    }

    async fn resolve_text(
        &self,
        draft: &NotificationDraft,
    ) -> Result<NotificationText, CreateNotificationError> {
        let raw = match (&draft.message, draft.from_user_id) {
            (Some(message), _) => message.clone(),
            (None, Some(from_user_id)) => {
                let name = self
                    .users
                    .display_name(from_user_id)
                    .await?
                    .unwrap_or_else(|| UNKNOWN_ACTOR_NAME.to_string());
                draft.kind.describe(&name)
            }
            (None, None) => return Err(CreateNotificationError::MissingText),
        };
        NotificationText::new(raw).map_err(CreateNotificationError::InvalidText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ConnectionIdFactory, RepositoryError, RoomMembership, Timestamp, ValueObjectError,
            publisher::MockEventPublisher, repository::MockNotificationRepository,
        },
        infrastructure::{
            realtime::{RoomFanout, RoomRegistry},
            repository::{InMemoryNotificationRepository, InMemoryUserDirectory},
        },
    };
    use tokio::sync::mpsc;

    fn user(id: i64) -> UserId {
        UserId::new(id).unwrap()
    }

    fn draft(kind: NotificationKind, message: Option<&str>, from: Option<i64>) -> NotificationDraft {
        NotificationDraft {
            user_id: user(1),
            kind,
            message: message.map(str::to_string),
            from_user_id: from.map(user),
            post_id: None,
            comment_id: None,
        }
    }

    async fn create_usecase() -> (CreateNotificationUseCase, Arc<RoomRegistry>) {
        let registry = Arc::new(RoomRegistry::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        users.insert(user(2), "Grace Hopper").await;
        let usecase = CreateNotificationUseCase::new(
            Arc::new(InMemoryNotificationRepository::new()),
            users,
            Arc::new(RoomFanout::new(registry.clone())),
        );
        (usecase, registry)
    }

    #[tokio::test]
    async fn test_explicit_message_is_kept_and_emitted_to_owner() {
        // テスト項目: 明示的な本文はそのまま保存され、所有者のルームへ notification が届く
        // given (前提条件):
        let (usecase, registry) = create_usecase().await;
        let connection_id = ConnectionIdFactory::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.connect(connection_id, tx, Timestamp::new(0));
        registry.join(connection_id, user(1));

        // when (操作):
        let notification = usecase
            .execute(draft(NotificationKind::Like, Some("custom text"), Some(2)))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(notification.message.as_str(), "custom text");
        assert!(!notification.is_read);
        let frame: serde_json::Value = serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
        assert_eq!(frame["event"], "notification");
        assert_eq!(frame["data"]["id"], notification.id.value());
        assert_eq!(frame["data"]["type"], "like");
    }

    #[tokio::test]
    async fn test_text_composed_from_origin_user_name() {
        // テスト項目: 本文が無い場合は発生元ユーザー名と種別から合成される
        let (usecase, _registry) = create_usecase().await;

        let cases = [
            (NotificationKind::Like, "Grace Hopper liked your post."),
            (NotificationKind::Comment, "Grace Hopper commented on your post."),
            (
                NotificationKind::FriendRequest,
                "Grace Hopper sent you a friend request.",
            ),
            (
                NotificationKind::FriendAccepted,
                "Grace Hopper accepted your friend request.",
            ),
            (NotificationKind::Message, "Grace Hopper sent you a message."),
        ];
        for (kind, expected) in cases {
            let notification = usecase.execute(draft(kind, None, Some(2))).await.unwrap();
            assert_eq!(notification.message.as_str(), expected);
        }
    }

    #[tokio::test]
    async fn test_unknown_origin_user_falls_back_to_someone() {
        // テスト項目: 発生元ユーザーが存在しない場合は "Someone" で合成される
        let (usecase, _registry) = create_usecase().await;

        let notification = usecase
            .execute(draft(NotificationKind::Like, None, Some(99)))
            .await
            .unwrap();

        assert_eq!(notification.message.as_str(), "Someone liked your post.");
    }

    #[tokio::test]
    async fn test_missing_text_and_origin_is_rejected() {
        // テスト項目: 本文も発生元も無い場合はエラー（保存も配信もされない）
        // given (前提条件): 呼ばれたら panic するモック
        let usecase = CreateNotificationUseCase::new(
            Arc::new(MockNotificationRepository::new()),
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(MockEventPublisher::new()),
        );

        // when (操作):
        let result = usecase.execute(draft(NotificationKind::Like, None, None)).await;

        // then (期待する結果):
        assert_eq!(result, Err(CreateNotificationError::MissingText));
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        // テスト項目: 空白のみの本文はバリデーションエラー
        let usecase = CreateNotificationUseCase::new(
            Arc::new(MockNotificationRepository::new()),
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(MockEventPublisher::new()),
        );

        let result = usecase
            .execute(draft(NotificationKind::Comment, Some("   "), None))
            .await;

        assert_eq!(
            result,
            Err(CreateNotificationError::InvalidText(
                ValueObjectError::NotificationTextEmpty
            ))
        );
    }

    #[tokio::test]
    async fn test_persistence_failure_emits_nothing() {
        // テスト項目: 永続化に失敗した通知は配信されない
        let mut notifications = MockNotificationRepository::new();
        notifications
            .expect_insert()
            .times(1)
            .returning(|_| Err(RepositoryError::Storage("locked".to_string())));
        let mut publisher = MockEventPublisher::new();
        publisher.expect_emit_to_user().never();
        let usecase = CreateNotificationUseCase::new(
            Arc::new(notifications),
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(publisher),
        );

        let result = usecase
            .execute(draft(NotificationKind::Like, Some("hello"), None))
            .await;

        assert_eq!(
            result,
            Err(CreateNotificationError::Persistence(RepositoryError::Storage(
                "locked".to_string()
            )))
        );
    }
}
