//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ConnectionDto, ConnectionsDto, QueueStateDto},
    ui::state::AppState,
};
use utage_shared::time::timestamp_to_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current queue and playback pointer
pub async fn get_queue_state(State(state): State<Arc<AppState>>) -> Json<QueueStateDto> {
    let snapshot = state.get_queue_state_usecase.execute().await;
    Json(snapshot.into())
}

/// Currently open WebSocket connections
pub async fn get_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionsDto> {
    let connections: Vec<ConnectionDto> = state
        .get_connections_usecase
        .execute()
        .await
        .into_iter()
        .map(|c| ConnectionDto {
            id: c.id.into_string(),
            connected_at: timestamp_to_rfc3339(c.connected_at.value()),
        })
        .collect();

    Json(ConnectionsDto {
        count: connections.len(),
        connections,
    })
}
