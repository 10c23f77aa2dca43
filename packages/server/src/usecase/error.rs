//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::MessageKind;

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 初期同期メッセージを送れなかった（接続が既に閉じている）
    #[error("failed to push init message: {0}")]
    InitPushFailed(String),
}

/// メッセージ処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// 起動時に選んだプロトコルでは扱わない種別
    #[error("message kind '{0}' is not supported by this protocol variant")]
    UnsupportedKind(MessageKind),

    #[error("broadcast failed: {0}")]
    BroadcastFailed(String),
}
