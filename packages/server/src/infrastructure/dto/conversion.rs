//! Conversion logic between DTOs and domain models.
//!
//! Inbound frames are decoded into a [`QueueCommand`] here; this is where the shape
//! of a message is validated. Outbound [`ServerEvent`]s are encoded according to
//! the protocol variant.

use serde_json::Value;
use thiserror::Error;

use crate::domain::{
    ProtocolVariant, QueueCommand, QueueItem, QueueState, ServerEvent, VideoId,
};
use crate::infrastructure::dto::{
    http::QueueStateDto,
    websocket::{ClientMessage, QueueItemDto, ServerMessage},
};

/// Reasons an inbound frame is dropped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageRejection {
    #[error("malformed message: {0}")]
    Malformed(String),

    #[error("add message without an item")]
    MissingItem,

    #[error("play message without a videoId")]
    MissingVideoId,

    #[error("unknown message type")]
    UnknownType,
}

/// Parse and validate one text frame.
pub fn decode_client_message(text: &str) -> Result<QueueCommand, MessageRejection> {
    let message = serde_json::from_str::<ClientMessage>(text)
        .map_err(|e| MessageRejection::Malformed(e.to_string()))?;
    QueueCommand::try_from(message)
}

/// Serialize an event for the wire.
pub fn encode_server_event(
    event: &ServerEvent,
    variant: ProtocolVariant,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerMessage::from_event(event, variant))
}

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<ClientMessage> for QueueCommand {
    type Error = MessageRejection;

    fn try_from(message: ClientMessage) -> Result<Self, Self::Error> {
        match message {
            ClientMessage::Add { item } => match item {
                Some(value) if is_truthy(&value) => {
                    Ok(QueueCommand::Add(QueueItem::from_value(value)))
                }
                _ => Err(MessageRejection::MissingItem),
            },
            ClientMessage::Queue { queue } => Ok(QueueCommand::ReplaceQueue(
                queue.into_iter().map(QueueItem::from_value).collect(),
            )),
            ClientMessage::Play { video_id } => video_id
                .and_then(|id| VideoId::new(id).ok())
                .map(QueueCommand::Play)
                .ok_or(MessageRejection::MissingVideoId),
            ClientMessage::Clear => Ok(QueueCommand::Clear),
            ClientMessage::Unknown => Err(MessageRejection::UnknownType),
        }
    }
}

/// `null`, `false`, `0` and `""` do not count as an item; anything else does
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<QueueItem> for QueueItemDto {
    fn from(model: QueueItem) -> Self {
        Self(model.into_value())
    }
}

impl From<QueueState> for QueueStateDto {
    fn from(model: QueueState) -> Self {
        Self {
            queue: model.items.into_iter().map(QueueItemDto::from).collect(),
            current_video: model.current.map(VideoId::into_string),
        }
    }
}

impl ServerMessage {
    pub fn from_event(event: &ServerEvent, variant: ProtocolVariant) -> Self {
        match event {
            ServerEvent::Init(state) => {
                let QueueStateDto {
                    queue,
                    current_video,
                } = state.clone().into();
                ServerMessage::Init {
                    queue,
                    current_video,
                }
            }
            ServerEvent::QueueUpdated(items) => ServerMessage::Queue {
                queue: items.iter().cloned().map(QueueItemDto::from).collect(),
            },
            ServerEvent::NowPlaying(video_id) => {
                let video_id = video_id.as_str().to_string();
                match variant {
                    ProtocolVariant::Play => ServerMessage::Play { video_id },
                    ProtocolVariant::CurrentVideo => ServerMessage::CurrentVideo { video_id },
                }
            }
        }
    }
}
