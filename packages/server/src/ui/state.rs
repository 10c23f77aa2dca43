//! Server state shared by the axum handlers.

use std::sync::Arc;

use crate::usecase::{GetConnectionsUseCase, GetQueueStateUseCase};

use super::event_loop::EventLoopHandle;

/// Shared application state
pub struct AppState {
    /// イベントループへの入り口（状態を変更する唯一の経路）
    pub event_loop: EventLoopHandle,
    /// GetQueueStateUseCase（現在の状態の取得）
    pub get_queue_state_usecase: Arc<GetQueueStateUseCase>,
    /// GetConnectionsUseCase（接続一覧の取得）
    pub get_connections_usecase: Arc<GetConnectionsUseCase>,
}
