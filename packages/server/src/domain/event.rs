//! サーバーからクライアントへ通知するイベント

use super::{
    entity::{QueueItem, QueueState},
    value_object::VideoId,
};

/// クライアントへ送るイベント
///
/// ワイヤー形式への変換はプロトコルのバリアントに依存するため Infrastructure 層で行う。
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// 新規接続にだけ送る初期同期
    Init(QueueState),
    /// キューが更新された
    QueueUpdated(Vec<QueueItem>),
    /// 再生中の動画が変わった
    NowPlaying(VideoId),
}
