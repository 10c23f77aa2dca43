//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::QueueItemDto;

/// `GET /api/queue`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueStateDto {
    pub queue: Vec<QueueItemDto>,
    #[serde(rename = "currentVideo")]
    pub current_video: Option<String>,
}

/// One entry of `GET /api/connections`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDto {
    pub id: String,
    /// RFC 3339
    #[serde(rename = "connectedAt")]
    pub connected_at: String,
}

/// `GET /api/connections`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionsDto {
    pub count: usize,
    pub connections: Vec<ConnectionDto>,
}
