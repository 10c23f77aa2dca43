//! UseCase: 再生中の動画の切り替え

use std::sync::Arc;

use crate::domain::{MessagePusher, QueueRepository, ServerEvent, VideoId};

use super::{broadcast::broadcast_to_all, error::RouteError};

/// 再生切り替えのユースケース
///
/// 動画 ID がキューに含まれているかは確認しない（キューを経由しない直接再生も通る）。
pub struct PlayVideoUseCase {
    repository: Arc<dyn QueueRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl PlayVideoUseCase {
    pub fn new(
        repository: Arc<dyn QueueRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(&self, video_id: VideoId) -> Result<usize, RouteError> {
        self.repository.set_current(video_id.clone()).await;

        broadcast_to_all(
            self.message_pusher.as_ref(),
            &ServerEvent::NowPlaying(video_id),
        )
        .await
    }
}
