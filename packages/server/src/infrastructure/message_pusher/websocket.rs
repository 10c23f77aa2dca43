//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続中のクライアントの `Sender` を管理（Connection Registry）
//! - イベントを 1 回だけシリアライズして各クライアントへ送信（Broadcast Engine）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された有界の `Sender` を受け取り、メッセージ送信に使用します。
//! 送信は `try_send` による投入だけなので、遅いクライアントを待つことはありません。
//! バッファが満杯の接続にはそのメッセージを届けず、溜め込みも再送もしません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{
        Connection, ConnectionId, MessagePushError, MessagePusher, ProtocolVariant,
        PusherChannel, ServerEvent, Timestamp,
    },
    infrastructure::dto::conversion::encode_server_event,
};

/// Registry に保持する接続情報
pub struct RegisteredClient {
    pub connected_at: Timestamp,
    pub sender: PusherChannel,
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let clients = Arc::new(Mutex::new(HashMap::new()));
/// let pusher = WebSocketMessagePusher::new(clients.clone(), ProtocolVariant::Play);
///
/// pusher.push_to(&connection_id, &ServerEvent::Init(snapshot)).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアント
    clients: Arc<Mutex<HashMap<ConnectionId, RegisteredClient>>>,
    /// 送信時のワイヤー形式
    variant: ProtocolVariant,
}

impl WebSocketMessagePusher {
    pub fn new(
        clients: Arc<Mutex<HashMap<ConnectionId, RegisteredClient>>>,
        variant: ProtocolVariant,
    ) -> Self {
        Self { clients, variant }
    }

    fn encode(&self, event: &ServerEvent) -> Result<String, MessagePushError> {
        encode_server_event(event, self.variant)
            .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(
        &self,
        connection_id: ConnectionId,
        connected_at: Timestamp,
        sender: PusherChannel,
    ) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        clients.insert(
            connection_id,
            RegisteredClient {
                connected_at,
                sender,
            },
        );
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(connection_id).is_some() {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
    }

    async fn all(&self) -> Vec<ConnectionId> {
        let clients = self.clients.lock().await;
        clients.keys().cloned().collect()
    }

    async fn connections(&self) -> Vec<Connection> {
        let clients = self.clients.lock().await;
        clients
            .iter()
            .map(|(id, client)| Connection::new(id.clone(), client.connected_at))
            .collect()
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content = self.encode(event)?;
        let clients = self.clients.lock().await;

        let client = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        client
            .sender
            .try_send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &ServerEvent,
    ) -> Result<usize, MessagePushError> {
        let content = self.encode(event)?;
        let clients = self.clients.lock().await;

        let mut delivered = 0;
        for target in targets {
            let Some(client) = clients.get(&target) else {
                tracing::debug!("Connection '{}' not found during broadcast, skipping", target);
                continue;
            };
            // 閉じかけ・詰まっている接続はスキップし、再送はしない
            match client.sender.try_send(content.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::debug!("Connection '{}' is not keeping up, skipping", target);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!("Connection '{}' is closing, skipping", target);
                }
            }
        }

        Ok(delivered)
    }
}
