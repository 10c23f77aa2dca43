//! MessagePusher trait 定義
//!
//! 接続の管理（Connection Registry）とクライアントへの送信（Broadcast Engine）の
//! インターフェース。具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{Connection, ConnectionId, MessagePushError, ServerEvent, Timestamp};

/// 1 接続あたりに溜めておける未送信メッセージ数
///
/// 溢れた分は読まれないまま捨てられる（遅いクライアントのために溜め込まない）。
pub const PUSHER_CHANNEL_CAPACITY: usize = 32;

/// クライアントの送信タスクへ繋がるチャンネル
pub type PusherChannel = mpsc::Sender<String>;

/// 送信タスク用の有界チャンネルを作る
pub fn pusher_channel() -> (PusherChannel, mpsc::Receiver<String>) {
    mpsc::channel(PUSHER_CHANNEL_CAPACITY)
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録し、ブロードキャスト対象にする
    async fn register_client(
        &self,
        connection_id: ConnectionId,
        connected_at: Timestamp,
        sender: PusherChannel,
    );

    /// 接続を登録解除する（未登録でも何もしない）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 現在登録されている全ての接続 ID（順序は不定）
    async fn all(&self) -> Vec<ConnectionId>;

    /// 現在登録されている接続の一覧
    async fn connections(&self) -> Vec<Connection>;

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信し、実際に送れた数を返す
    ///
    /// 閉じている接続、バッファが満杯の接続、見つからない接続は黙ってスキップする。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &ServerEvent,
    ) -> Result<usize, MessagePushError>;
}
