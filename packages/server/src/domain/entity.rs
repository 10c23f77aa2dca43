//! Entities
//!
//! キュー（プレイリスト）と接続のドメインモデル。

use serde_json::Value;

use super::value_object::{ConnectionId, Timestamp, VideoId};

/// キューの 1 エントリ
///
/// クライアントが送った JSON 値を解釈せずにそのまま保持する。
/// オブジェクトでも文字列でも数値でもよく、フィールドの順序も送られたまま返す。
/// 同じ値の重複も許容する。
#[derive(Debug, Clone, PartialEq)]
pub struct QueueItem(Value);

impl QueueItem {
    /// `{"link": <link>}` のエントリ
    pub fn new(link: impl Into<String>) -> Self {
        let mut map = serde_json::Map::new();
        map.insert("link".to_string(), Value::String(link.into()));
        Self(Value::Object(map))
    }

    /// 受け取った値をそのまま包む
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// 投稿者の表示名を `username` として付ける（オブジェクトの場合のみ）
    pub fn submitted_by(mut self, name: impl Into<String>) -> Self {
        if let Value::Object(map) = &mut self.0 {
            map.insert("username".to_string(), Value::String(name.into()));
        }
        self
    }

    /// リンクとして読める部分（`link` フィールド、または文字列そのもの）
    pub fn link(&self) -> Option<&str> {
        match &self.0 {
            Value::String(link) => Some(link),
            Value::Object(map) => map.get("link").and_then(Value::as_str),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// キューと再生中ポインタのスナップショット
///
/// `current` は `items` のどのエントリとも対応している必要はない。
/// 2 つは独立に更新され、参照整合性はチェックしない。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueueState {
    pub items: Vec<QueueItem>,
    pub current: Option<VideoId>,
}

impl QueueState {
    /// 空のキュー、再生中なし
    pub fn new() -> Self {
        Self::default()
    }
}

/// Registry に登録された接続
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self { id, connected_at }
    }
}
