//! プロトコルのバリアント
//!
//! 観測された 2 つのデプロイはメッセージ種別の集合と、再生通知の `type` が異なる。
//! 起動時にどちらか一方を明示的に選ぶ。

use super::command::MessageKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolVariant {
    /// `add` / `queue` / `play` / `clear` を受け付け、再生通知は `{"type":"play"}`
    #[default]
    Play,
    /// `add` / `play` / `clear` を受け付け、再生通知は `{"type":"currentVideo"}`
    CurrentVideo,
}

impl ProtocolVariant {
    /// このバリアントがメッセージ種別を受け付けるか
    pub fn accepts(&self, kind: MessageKind) -> bool {
        match self {
            ProtocolVariant::Play => true,
            ProtocolVariant::CurrentVideo => kind != MessageKind::Queue,
        }
    }

    /// 再生通知メッセージの `type`
    pub fn play_event_type(&self) -> &'static str {
        match self {
            ProtocolVariant::Play => "play",
            ProtocolVariant::CurrentVideo => "currentVideo",
        }
    }
}
