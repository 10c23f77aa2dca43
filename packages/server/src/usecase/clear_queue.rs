//! UseCase: キューのクリア

use std::sync::Arc;

use crate::domain::{MessagePusher, QueueRepository, ServerEvent};

use super::{broadcast::broadcast_to_all, error::RouteError};

/// キュークリアのユースケース
pub struct ClearQueueUseCase {
    repository: Arc<dyn QueueRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ClearQueueUseCase {
    pub fn new(
        repository: Arc<dyn QueueRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// キューを空にして全接続に空のキューを送る（再生中の動画 ID はそのまま）
    pub async fn execute(&self) -> Result<usize, RouteError> {
        self.repository.replace_items(Vec::new()).await;

        broadcast_to_all(
            self.message_pusher.as_ref(),
            &ServerEvent::QueueUpdated(Vec::new()),
        )
        .await
    }
}
