//! UseCase: 接続一覧の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Connection, MessagePusher};

pub struct GetConnectionsUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetConnectionsUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続の古い順
    pub async fn execute(&self) -> Vec<Connection> {
        let mut connections = self.message_pusher.connections().await;
        connections.sort_by(|a, b| {
            a.connected_at
                .cmp(&b.connected_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        connections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, MockMessagePusher, Timestamp};

    #[tokio::test]
    async fn test_connections_are_sorted_by_connected_at() {
        // テスト項目: 接続一覧が接続時刻の古い順に並ぶ
        // given (前提条件):
        let mut message_pusher = MockMessagePusher::new();
        message_pusher.expect_connections().returning(|| {
            vec![
                Connection::new(
                    ConnectionId::new("charlie".to_string()).unwrap(),
                    Timestamp::new(3000),
                ),
                Connection::new(
                    ConnectionId::new("alice".to_string()).unwrap(),
                    Timestamp::new(1000),
                ),
                Connection::new(
                    ConnectionId::new("bob".to_string()).unwrap(),
                    Timestamp::new(2000),
                ),
            ]
        });
        let usecase = GetConnectionsUseCase::new(Arc::new(message_pusher));

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        let ids: Vec<&str> = result.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob", "charlie"]);
    }
}
