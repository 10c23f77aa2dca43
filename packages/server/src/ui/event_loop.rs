//! 単一のイベントループ
//!
//! 接続・受信・切断の全イベントを 1 本のタスクが到着順に 1 つずつ処理する。
//! 1 つのイベント（Store の更新とブロードキャストの投入）が終わるまで次のイベントには進まない。
//! ソケットの読み書きは接続ごとのタスクが行い、状態には触れない。

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, PusherChannel},
    infrastructure::dto::conversion::{MessageRejection, decode_client_message},
    usecase::{ConnectClientUseCase, DisconnectClientUseCase, MessageRouter, RouteError},
};

/// イベントループへの入力
#[derive(Debug)]
pub enum HubEvent {
    Connected {
        connection_id: ConnectionId,
        sender: PusherChannel,
    },
    Received {
        connection_id: ConnectionId,
        text: String,
    },
    Disconnected {
        connection_id: ConnectionId,
    },
}

/// イベントループが既に停止している
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event loop is closed")]
pub struct EventLoopClosed;

/// イベントループへイベントを投入するハンドル
#[derive(Clone)]
pub struct EventLoopHandle {
    tx: mpsc::UnboundedSender<HubEvent>,
}

impl EventLoopHandle {
    pub fn connected(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), EventLoopClosed> {
        self.send(HubEvent::Connected {
            connection_id,
            sender,
        })
    }

    pub fn received(&self, connection_id: ConnectionId, text: String) -> Result<(), EventLoopClosed> {
        self.send(HubEvent::Received {
            connection_id,
            text,
        })
    }

    pub fn disconnected(&self, connection_id: ConnectionId) -> Result<(), EventLoopClosed> {
        self.send(HubEvent::Disconnected { connection_id })
    }

    fn send(&self, event: HubEvent) -> Result<(), EventLoopClosed> {
        self.tx.send(event).map_err(|_| EventLoopClosed)
    }
}

pub struct EventLoop {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    message_router: Arc<MessageRouter>,
    rx: mpsc::UnboundedReceiver<HubEvent>,
}

impl EventLoop {
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        message_router: Arc<MessageRouter>,
    ) -> (Self, EventLoopHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_loop = Self {
            connect_client_usecase,
            disconnect_client_usecase,
            message_router,
            rx,
        };
        (event_loop, EventLoopHandle { tx })
    }

    /// 全てのハンドルが破棄されるまでイベントを処理し続ける
    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            self.handle(event).await;
        }
        tracing::info!("Event loop stopped");
    }

    async fn handle(&self, event: HubEvent) {
        match event {
            HubEvent::Connected {
                connection_id,
                sender,
            } => match self
                .connect_client_usecase
                .execute(connection_id.clone(), sender)
                .await
            {
                Ok(_) => tracing::info!("Sent init snapshot to '{}'", connection_id),
                Err(e) => tracing::warn!("Connection '{}' dropped on connect: {}", connection_id, e),
            },
            HubEvent::Received {
                connection_id,
                text,
            } => self.handle_text(&connection_id, &text).await,
            HubEvent::Disconnected { connection_id } => {
                let remaining = self
                    .disconnect_client_usecase
                    .execute(&connection_id)
                    .await;
                tracing::info!(
                    "Connection '{}' removed from registry ({} remaining)",
                    connection_id,
                    remaining
                );
            }
        }
    }

    async fn handle_text(&self, connection_id: &ConnectionId, text: &str) {
        let command = match decode_client_message(text) {
            Ok(command) => command,
            Err(MessageRejection::UnknownType) => {
                tracing::debug!("Ignoring message of unknown type from '{}'", connection_id);
                return;
            }
            Err(e) => {
                tracing::warn!("Dropping message from '{}': {}", connection_id, e);
                return;
            }
        };

        let kind = command.kind();
        match self.message_router.route(connection_id, command).await {
            Ok(delivered) => tracing::info!(
                "Broadcast '{}' from '{}' to {} connection(s)",
                kind,
                connection_id,
                delivered
            ),
            Err(RouteError::UnsupportedKind(kind)) => tracing::warn!(
                "Dropping '{}' message from '{}': not supported by the {:?} protocol",
                kind,
                connection_id,
                self.message_router.variant()
            ),
            Err(e) => tracing::warn!("Failed to route message from '{}': {}", connection_id, e),
        }
    }
}
