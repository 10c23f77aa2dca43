//! 全接続へのブロードキャスト

use crate::domain::{MessagePusher, ServerEvent};

use super::error::RouteError;

/// 呼び出し時点で登録されている全ての接続（送信者を含む）へイベントを送る
///
/// 実際に届けた接続数を返す。
pub(super) async fn broadcast_to_all(
    message_pusher: &dyn MessagePusher,
    event: &ServerEvent,
) -> Result<usize, RouteError> {
    let targets = message_pusher.all().await;
    message_pusher
        .broadcast(targets, event)
        .await
        .map_err(|e| RouteError::BroadcastFailed(e.to_string()))
}
