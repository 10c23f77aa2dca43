//! InMemory Queue Repository 実装
//!
//! ドメイン層が定義する QueueRepository trait の具体的な実装。
//! プロセス全体で 1 つの `QueueState` を保持し、永続化はしません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{QueueItem, QueueRepository, QueueState, VideoId};

/// インメモリ Queue Repository 実装
pub struct InMemoryQueueRepository {
    state: Arc<Mutex<QueueState>>,
}

impl InMemoryQueueRepository {
    pub fn new(state: Arc<Mutex<QueueState>>) -> Self {
        Self { state }
    }
}

impl Default for InMemoryQueueRepository {
    /// 空のキュー、再生中なしで開始
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(QueueState::new())))
    }
}

#[async_trait]
impl QueueRepository for InMemoryQueueRepository {
    async fn get_snapshot(&self) -> QueueState {
        let state = self.state.lock().await;
        state.clone()
    }

    async fn replace_items(&self, items: Vec<QueueItem>) {
        let mut state = self.state.lock().await;
        state.items = items;
    }

    async fn set_current(&self, video_id: VideoId) {
        let mut state = self.state.lock().await;
        state.current = Some(video_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(value: &str) -> VideoId {
        VideoId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_starts_empty() {
        // テスト項目: 作成直後はキューが空で再生中も無い
        // given (前提条件):
        let repo = InMemoryQueueRepository::default();

        // when (操作):
        let snapshot = repo.get_snapshot().await;

        // then (期待する結果):
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.current, None);
    }

    #[tokio::test]
    async fn test_replace_items_keeps_order_and_duplicates() {
        // テスト項目: 置き換えたキューは順序と重複がそのまま保たれる
        // given (前提条件):
        let repo = InMemoryQueueRepository::default();
        let items = vec![
            QueueItem::new("b"),
            QueueItem::new("a"),
            QueueItem::new("b"),
        ];

        // when (操作):
        repo.replace_items(items.clone()).await;

        // then (期待する結果):
        assert_eq!(repo.get_snapshot().await.items, items);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached_from_store() {
        // テスト項目: 取得したスナップショットを変更しても Store には影響しない
        // given (前提条件):
        let repo = InMemoryQueueRepository::default();
        repo.replace_items(vec![QueueItem::new("abc123")]).await;

        // when (操作):
        let mut snapshot = repo.get_snapshot().await;
        snapshot.items.clear();

        // then (期待する結果):
        assert_eq!(repo.get_snapshot().await.items.len(), 1);
    }

    #[tokio::test]
    async fn test_set_current_is_independent_of_items() {
        // テスト項目: 再生中の動画 ID はキューの内容と無関係に設定できる
        // given (前提条件):
        let repo = InMemoryQueueRepository::default();
        repo.replace_items(vec![QueueItem::new("abc123")]).await;

        // when (操作):
        repo.set_current(video("not-in-queue")).await;
        repo.set_current(video("xyz789")).await;

        // then (期待する結果):
        let snapshot = repo.get_snapshot().await;
        assert_eq!(snapshot.current, Some(video("xyz789")));
        assert_eq!(snapshot.items, vec![QueueItem::new("abc123")]);
    }

    #[tokio::test]
    async fn test_shared_state_is_visible_through_handle() {
        // テスト項目: 外部から渡した状態を Repository 経由で更新できる
        // given (前提条件):
        let state = Arc::new(Mutex::new(QueueState::new()));
        let repo = InMemoryQueueRepository::new(state.clone());

        // when (操作):
        repo.replace_items(vec![QueueItem::new("abc123")]).await;

        // then (期待する結果):
        assert_eq!(state.lock().await.items.len(), 1);
    }
}
