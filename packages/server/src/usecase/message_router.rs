//! UseCase: メッセージの振り分け
//!
//! ### 何をテストしているか
//! - MessageRouter::route() メソッド
//! - 種別ごとの Store への適用とブロードキャスト
//! - プロトコルのバリアントが受け付けない種別の拒否
//!
//! ### どのような状況を想定しているか
//! - 正常系：add / queue / play / clear
//! - 異常系：currentVideo バリアントへの queue（全置換）

use std::sync::Arc;

use crate::domain::{ConnectionId, ProtocolVariant, QueueCommand};

use super::{
    AddItemUseCase, ClearQueueUseCase, PlayVideoUseCase, ReplaceQueueUseCase, error::RouteError,
};

/// メッセージ種別をキーにした振り分け
///
/// 自身は状態を持たない。状態は全て Store にある。
pub struct MessageRouter {
    variant: ProtocolVariant,
    add_item_usecase: Arc<AddItemUseCase>,
    replace_queue_usecase: Arc<ReplaceQueueUseCase>,
    play_video_usecase: Arc<PlayVideoUseCase>,
    clear_queue_usecase: Arc<ClearQueueUseCase>,
}

impl MessageRouter {
    pub fn new(
        variant: ProtocolVariant,
        add_item_usecase: Arc<AddItemUseCase>,
        replace_queue_usecase: Arc<ReplaceQueueUseCase>,
        play_video_usecase: Arc<PlayVideoUseCase>,
        clear_queue_usecase: Arc<ClearQueueUseCase>,
    ) -> Self {
        Self {
            variant,
            add_item_usecase,
            replace_queue_usecase,
            play_video_usecase,
            clear_queue_usecase,
        }
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// コマンドを Store に適用し、結果をブロードキャストする
    ///
    /// # Arguments
    ///
    /// * `from` - 送信元の接続（ログ用。ブロードキャスト対象には送信元も含まれる）
    /// * `command` - 検証済みのコマンド
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 届けた接続数
    /// * `Err(RouteError)` - 受け付けない種別、またはブロードキャスト失敗
    pub async fn route(
        &self,
        from: &ConnectionId,
        command: QueueCommand,
    ) -> Result<usize, RouteError> {
        let kind = command.kind();
        if !self.variant.accepts(kind) {
            return Err(RouteError::UnsupportedKind(kind));
        }
        tracing::debug!("Routing '{}' message from connection '{}'", kind, from);

        match command {
            QueueCommand::Add(item) => self.add_item_usecase.execute(item).await,
            QueueCommand::ReplaceQueue(items) => self.replace_queue_usecase.execute(items).await,
            QueueCommand::Play(video_id) => self.play_video_usecase.execute(video_id).await,
            QueueCommand::Clear => self.clear_queue_usecase.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            MessageKind, MessagePusher, QueueItem, QueueRepository, Timestamp, VideoId,
            pusher_channel,
        },
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryQueueRepository,
        },
    };
    use std::collections::HashMap;
    use tokio::sync::{Mutex, mpsc};

    struct Fixture {
        router: MessageRouter,
        repository: Arc<InMemoryQueueRepository>,
        message_pusher: Arc<WebSocketMessagePusher>,
    }

    fn create_fixture(variant: ProtocolVariant) -> Fixture {
        let repository = Arc::new(InMemoryQueueRepository::default());
        let message_pusher = Arc::new(WebSocketMessagePusher::new(
            Arc::new(Mutex::new(HashMap::new())),
            variant,
        ));
        let router = MessageRouter::new(
            variant,
            Arc::new(AddItemUseCase::new(repository.clone(), message_pusher.clone())),
            Arc::new(ReplaceQueueUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(PlayVideoUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(ClearQueueUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
        );
        Fixture {
            router,
            repository,
            message_pusher,
        }
    }

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    async fn connect(
        message_pusher: &WebSocketMessagePusher,
        name: &str,
    ) -> mpsc::Receiver<String> {
        let (tx, rx) = pusher_channel();
        message_pusher
            .register_client(id(name), Timestamp::new(1000), tx)
            .await;
        rx
    }

    #[tokio::test]
    async fn test_add_is_broadcast_to_sender_and_others() {
        // テスト項目: add の結果は送信者を含む全接続に届く
        // given (前提条件):
        let fixture = create_fixture(ProtocolVariant::Play);
        let mut rx_alice = connect(&fixture.message_pusher, "alice").await;
        let mut rx_bob = connect(&fixture.message_pusher, "bob").await;

        // when (操作):
        let result = fixture
            .router
            .route(&id("alice"), QueueCommand::Add(QueueItem::new("abc123")))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(2));
        let expected = Some(r#"{"type":"queue","queue":[{"link":"abc123"}]}"#.to_string());
        assert_eq!(rx_alice.recv().await, expected);
        assert_eq!(rx_bob.recv().await, expected);
    }

    #[tokio::test]
    async fn test_play_with_empty_queue() {
        // テスト項目: キューが空でも play は全接続に届き、キューは空のまま
        // given (前提条件):
        let fixture = create_fixture(ProtocolVariant::Play);
        let mut rx_alice = connect(&fixture.message_pusher, "alice").await;

        // when (操作):
        let video_id = VideoId::new("xyz789".to_string()).unwrap();
        let result = fixture
            .router
            .route(&id("alice"), QueueCommand::Play(video_id.clone()))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        assert_eq!(
            rx_alice.recv().await,
            Some(r#"{"type":"play","videoId":"xyz789"}"#.to_string())
        );
        let snapshot = fixture.repository.get_snapshot().await;
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.current, Some(video_id));
    }

    #[tokio::test]
    async fn test_current_video_variant_rejects_queue_replace() {
        // テスト項目: currentVideo バリアントでは queue（全置換）が拒否され、状態も変わらない
        // given (前提条件):
        let fixture = create_fixture(ProtocolVariant::CurrentVideo);
        let mut rx_alice = connect(&fixture.message_pusher, "alice").await;

        // when (操作):
        let result = fixture
            .router
            .route(
                &id("alice"),
                QueueCommand::ReplaceQueue(vec![QueueItem::new("abc123")]),
            )
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(RouteError::UnsupportedKind(MessageKind::Queue)));
        assert!(fixture.repository.get_snapshot().await.items.is_empty());
        assert!(rx_alice.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_current_video_variant_announces_current_video() {
        // テスト項目: currentVideo バリアントでは再生通知の type が currentVideo になる
        // given (前提条件):
        let fixture = create_fixture(ProtocolVariant::CurrentVideo);
        let mut rx_alice = connect(&fixture.message_pusher, "alice").await;

        // when (操作):
        fixture
            .router
            .route(
                &id("alice"),
                QueueCommand::Play(VideoId::new("xyz789".to_string()).unwrap()),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            rx_alice.recv().await,
            Some(r#"{"type":"currentVideo","videoId":"xyz789"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_disconnected_connection_is_not_targeted() {
        // テスト項目: 切断済みの接続には届かず、処理はエラーにならない
        // given (前提条件):
        let fixture = create_fixture(ProtocolVariant::Play);
        let mut rx_alice = connect(&fixture.message_pusher, "alice").await;
        let _rx_bob = connect(&fixture.message_pusher, "bob").await;
        fixture.message_pusher.unregister_client(&id("bob")).await;

        // when (操作):
        let result = fixture
            .router
            .route(&id("alice"), QueueCommand::Add(QueueItem::new("abc123")))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        assert!(rx_alice.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_clear_after_adds() {
        // テスト項目: 追加の後の clear で空のキューがブロードキャストされる
        // given (前提条件):
        let fixture = create_fixture(ProtocolVariant::Play);
        let mut rx_alice = connect(&fixture.message_pusher, "alice").await;
        for link in ["a", "b"] {
            fixture
                .router
                .route(&id("alice"), QueueCommand::Add(QueueItem::new(link)))
                .await
                .unwrap();
        }

        // when (操作):
        fixture
            .router
            .route(&id("alice"), QueueCommand::Clear)
            .await
            .unwrap();

        // then (期待する結果):
        let mut last = None;
        while let Ok(message) = rx_alice.try_recv() {
            last = Some(message);
        }
        assert_eq!(last, Some(r#"{"type":"queue","queue":[]}"#.to_string()));
        assert!(fixture.repository.get_snapshot().await.items.is_empty());
    }
}
