//! クライアントから届いたミューテーション要求（検証済み）

use std::fmt;

use super::{entity::QueueItem, value_object::VideoId};

/// メッセージ種別
///
/// ワイヤー上の `type` フィールドに対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Add,
    Queue,
    Play,
    Clear,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Add => "add",
            MessageKind::Queue => "queue",
            MessageKind::Play => "play",
            MessageKind::Clear => "clear",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store に適用するコマンド
#[derive(Debug, Clone, PartialEq)]
pub enum QueueCommand {
    /// 末尾に追加
    Add(QueueItem),
    /// キュー全体を置き換え（追加・削除・並べ替え・シャッフル・クリアを上流で計算済み）
    ReplaceQueue(Vec<QueueItem>),
    /// 再生中の動画を設定
    Play(VideoId),
    /// キューを空にする
    Clear,
}

impl QueueCommand {
    pub fn kind(&self) -> MessageKind {
        match self {
            QueueCommand::Add(_) => MessageKind::Add,
            QueueCommand::ReplaceQueue(_) => MessageKind::Queue,
            QueueCommand::Play(_) => MessageKind::Play,
            QueueCommand::Clear => MessageKind::Clear,
        }
    }
}
