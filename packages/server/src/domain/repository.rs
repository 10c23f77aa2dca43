//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{QueueItem, QueueState, VideoId};

/// Queue Repository trait（Queue/State Store）
///
/// 値の検証は一切行わない。空のリンクや未知の動画 ID もそのまま保存する。
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// 現在の状態を値として取得（呼び出し側と可変な状態を共有しない）
    async fn get_snapshot(&self) -> QueueState;

    /// キュー全体を置き換える
    async fn replace_items(&self, items: Vec<QueueItem>);

    /// 再生中の動画 ID を無条件に置き換える
    async fn set_current(&self, video_id: VideoId);
}
