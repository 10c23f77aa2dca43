//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("video id must not be empty")]
    EmptyVideoId,
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先の接続が Registry に存在しない
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    /// 送信先の接続が閉じている
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// ペイロードのシリアライズに失敗
    #[error("failed to encode message: {0}")]
    EncodeFailed(String),
}
