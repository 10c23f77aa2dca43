//! UseCase: キューへの追加
//!
//! ### 何をテストしているか
//! - AddItemUseCase::execute() メソッド
//! - 末尾への追加と、キュー全体の全接続へのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：到着順に追加される
//! - エッジケース：同じ item を 2 回追加すると 2 件になる（冪等ではない）

use std::sync::Arc;

use crate::domain::{MessagePusher, QueueItem, QueueRepository, ServerEvent};

use super::{broadcast::broadcast_to_all, error::RouteError};

/// キュー追加のユースケース
pub struct AddItemUseCase {
    repository: Arc<dyn QueueRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl AddItemUseCase {
    pub fn new(
        repository: Arc<dyn QueueRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// item を末尾に追加し、更新後のキューを全接続に送る
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 届けた接続数
    pub async fn execute(&self, item: QueueItem) -> Result<usize, RouteError> {
        let mut items = self.repository.get_snapshot().await.items;
        items.push(item);
        self.repository.replace_items(items.clone()).await;

        broadcast_to_all(
            self.message_pusher.as_ref(),
            &ServerEvent::QueueUpdated(items),
        )
        .await
    }
}
