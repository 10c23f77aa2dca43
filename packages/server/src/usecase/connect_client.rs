//! UseCase: クライアント接続処理
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - Registry への登録と、新規接続だけへの初期同期（init）の送信
//!
//! ### どのような状況を想定しているか
//! - 正常系：空の状態 / 既存のキューがある状態での接続
//! - 異常系：接続が登録直後に閉じていて init を送れない

use std::sync::Arc;

use utage_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, PusherChannel, QueueRepository, ServerEvent, Timestamp,
};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    repository: Arc<dyn QueueRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    pub fn new(
        repository: Arc<dyn QueueRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 接続を登録し、その接続にだけ現在のスナップショットを送る
    ///
    /// init は必ずその接続の最初のメッセージになる。
    /// 送れなかった場合は登録を取り消す。
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 接続時刻
    /// * `Err(ConnectError)` - init を送れなかった
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Timestamp, ConnectError> {
        let connected_at = Timestamp::new(self.clock.now_millis());

        // 1. Registry に登録
        self.message_pusher
            .register_client(connection_id.clone(), connected_at, sender)
            .await;

        // 2. 現在の状態をその接続にだけ送る
        let snapshot = self.repository.get_snapshot().await;
        if let Err(e) = self
            .message_pusher
            .push_to(&connection_id, &ServerEvent::Init(snapshot))
            .await
        {
            self.message_pusher.unregister_client(&connection_id).await;
            return Err(ConnectError::InitPushFailed(e.to_string()));
        }

        Ok(connected_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            MockMessagePusher, ProtocolVariant, QueueItem, QueueState, VideoId, pusher_channel,
        },
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryQueueRepository,
        },
    };
    use std::collections::HashMap;
    use tokio::sync::Mutex;
    use utage_shared::time::FixedClock;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
        Arc::new(WebSocketMessagePusher::new(
            Arc::new(Mutex::new(HashMap::new())),
            ProtocolVariant::Play,
        ))
    }

    #[tokio::test]
    async fn test_connect_sends_init_to_new_connection_only() {
        // テスト項目: 新規接続には init が届き、既存の接続には何も届かない
        // given (前提条件):
        let repository = Arc::new(InMemoryQueueRepository::default());
        repository
            .replace_items(vec![QueueItem::new("abc123").submitted_by("alice")])
            .await;
        repository
            .set_current(VideoId::new("xyz789".to_string()).unwrap())
            .await;
        let message_pusher = create_test_message_pusher();
        let usecase = ConnectClientUseCase::new(
            repository,
            message_pusher.clone(),
            Arc::new(FixedClock::new(1000)),
        );
        let (tx_alice, mut rx_alice) = pusher_channel();
        usecase.execute(id("alice"), tx_alice).await.unwrap();
        assert!(rx_alice.recv().await.is_some()); // alice 自身の init

        // when (操作):
        let (tx_bob, mut rx_bob) = pusher_channel();
        let result = usecase.execute(id("bob"), tx_bob).await;

        // then (期待する結果):
        assert_eq!(result, Ok(Timestamp::new(1000)));
        assert_eq!(
            rx_bob.recv().await,
            Some(
                r#"{"type":"init","queue":[{"link":"abc123","username":"alice"}],"currentVideo":"xyz789"}"#
                    .to_string()
            )
        );
        assert!(rx_alice.try_recv().is_err());
        assert_eq!(message_pusher.all().await.len(), 2);
    }

    #[tokio::test]
    async fn test_connect_pushes_snapshot_from_store() {
        // テスト項目: init には Store の現在のスナップショットがそのまま使われる
        // given (前提条件):
        let repository = Arc::new(InMemoryQueueRepository::default());
        repository.replace_items(vec![QueueItem::new("a")]).await;
        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_register_client()
            .withf(|connection_id, connected_at, _| {
                connection_id.as_str() == "alice" && connected_at.value() == 42
            })
            .times(1)
            .return_const(());
        message_pusher
            .expect_push_to()
            .withf(|connection_id, event| {
                connection_id.as_str() == "alice"
                    && *event
                        == ServerEvent::Init(QueueState {
                            items: vec![QueueItem::new("a")],
                            current: None,
                        })
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = ConnectClientUseCase::new(
            repository,
            Arc::new(message_pusher),
            Arc::new(FixedClock::new(42)),
        );
        let (tx, _rx) = pusher_channel();

        // when (操作):
        let result = usecase.execute(id("alice"), tx).await;

        // then (期待する結果):
        assert_eq!(result, Ok(Timestamp::new(42)));
    }

    #[tokio::test]
    async fn test_connect_rolls_back_when_connection_already_closed() {
        // テスト項目: init を送れない場合は登録が取り消される
        // given (前提条件):
        let repository = Arc::new(InMemoryQueueRepository::default());
        let message_pusher = create_test_message_pusher();
        let usecase = ConnectClientUseCase::new(
            repository,
            message_pusher.clone(),
            Arc::new(FixedClock::new(1000)),
        );
        let (tx, rx) = pusher_channel();
        drop(rx);

        // when (操作):
        let result = usecase.execute(id("alice"), tx).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ConnectError::InitPushFailed(_))));
        assert!(message_pusher.all().await.is_empty());
    }
}
