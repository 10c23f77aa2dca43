//! UseCase: 現在の状態の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{QueueRepository, QueueState};

pub struct GetQueueStateUseCase {
    repository: Arc<dyn QueueRepository>,
}

impl GetQueueStateUseCase {
    pub fn new(repository: Arc<dyn QueueRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> QueueState {
        self.repository.get_snapshot().await
    }
}
