//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by its `type` field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One queue entry as it travels on the wire.
///
/// The server never interprets an entry: whatever JSON value a client submitted
/// is echoed back unchanged. The accessors below are read-only views for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueItemDto(pub Value);

impl QueueItemDto {
    /// `{"link": .., "username": ..}` as the terminal client submits it
    pub fn new(link: impl Into<String>, username: Option<&str>) -> Self {
        let mut map = Map::new();
        map.insert("link".to_string(), Value::String(link.into()));
        if let Some(name) = username {
            map.insert("username".to_string(), Value::String(name.to_string()));
        }
        Self(Value::Object(map))
    }

    /// The `link` field, or the entry itself when it is a bare string
    pub fn link(&self) -> Option<&str> {
        match &self.0 {
            Value::String(link) => Some(link),
            _ => self.field("link"),
        }
    }

    /// Display name of whoever submitted the entry (`username`, else `submittedBy`)
    pub fn username(&self) -> Option<&str> {
        self.field("username").or_else(|| self.field("submittedBy"))
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Client → Server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Add {
        #[serde(default)]
        item: Option<Value>,
    },
    Queue {
        queue: Vec<Value>,
    },
    Play {
        #[serde(rename = "videoId", default)]
        video_id: Option<String>,
    },
    Clear,
    /// Any `type` this server does not know about
    #[serde(other)]
    Unknown,
}

/// Server → Client
///
/// `Play` and `CurrentVideo` carry the same payload; which one is sent depends on
/// the protocol variant the server was started with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "init")]
    Init {
        queue: Vec<QueueItemDto>,
        #[serde(rename = "currentVideo")]
        current_video: Option<String>,
    },
    #[serde(rename = "queue")]
    Queue { queue: Vec<QueueItemDto> },
    #[serde(rename = "play")]
    Play {
        #[serde(rename = "videoId")]
        video_id: String,
    },
    #[serde(rename = "currentVideo")]
    CurrentVideo {
        #[serde(rename = "videoId")]
        video_id: String,
    },
}

impl ServerMessage {
    /// Video id carried by either flavour of the play notification
    pub fn played_video_id(&self) -> Option<&str> {
        match self {
            ServerMessage::Play { video_id } | ServerMessage::CurrentVideo { video_id } => {
                Some(video_id)
            }
            _ => None,
        }
    }
}
