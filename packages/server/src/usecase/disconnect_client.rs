//! UseCase: クライアント切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// クライアント切断のユースケース
///
/// Registry から外すだけ。接続ごとの状態は他に無いので後片付けも不要。
pub struct DisconnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 切断を実行し、残っている接続数を返す
    ///
    /// 既に切断済みの接続に対して呼んでも何もしない。
    pub async fn execute(&self, connection_id: &ConnectionId) -> usize {
        self.message_pusher.unregister_client(connection_id).await;
        self.message_pusher.all().await.len()
    }
}
