//! UseCase: キューの全置換

use std::sync::Arc;

use crate::domain::{MessagePusher, QueueItem, QueueRepository, ServerEvent};

use super::{broadcast::broadcast_to_all, error::RouteError};

/// キュー全置換のユースケース
///
/// 削除・並べ替え・シャッフルはクライアント側で計算され、結果の配列だけが届く。
pub struct ReplaceQueueUseCase {
    repository: Arc<dyn QueueRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ReplaceQueueUseCase {
    pub fn new(
        repository: Arc<dyn QueueRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(&self, items: Vec<QueueItem>) -> Result<usize, RouteError> {
        self.repository.replace_items(items.clone()).await;

        broadcast_to_all(
            self.message_pusher.as_ref(),
            &ServerEvent::QueueUpdated(items),
        )
        .await
    }
}
