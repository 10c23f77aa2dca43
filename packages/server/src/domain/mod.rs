//! Domain 層
//!
//! プレイリスト（キュー）と再生中ポインタのモデル、およびデータストア・通知の
//! インターフェース（trait）を定義します。具体的な実装は Infrastructure 層が提供します。

pub mod command;
pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod protocol;
pub mod repository;
pub mod value_object;

pub use command::{MessageKind, QueueCommand};
pub use entity::{Connection, QueueItem, QueueState};
pub use error::{MessagePushError, ValueObjectError};
pub use event::ServerEvent;
pub use message_pusher::{
    MessagePusher, PUSHER_CHANNEL_CAPACITY, PusherChannel, pusher_channel,
};
pub use protocol::ProtocolVariant;
pub use repository::QueueRepository;
pub use value_object::{ConnectionId, ConnectionIdFactory, Timestamp, VideoId};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
