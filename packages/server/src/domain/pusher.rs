//! メッセージ送信（通知）のインターフェース
//!
//! UseCase 層はこの trait に依存し、WebSocket 等の具体的な送信手段には
//! 依存しません。具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{connection::ConnectionId, error::MessagePushError};

/// コネクションへの送信チャンネル
///
/// unbounded チャンネルなので送信はブロックしません。ルームのロックを
/// 保持したままでも安全に enqueue できます（遅い受信側が対局を止めない）。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信の抽象化
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// コネクションの送信チャンネルを登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// コネクションの送信チャンネルを登録解除
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 特定のコネクションに送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 複数のコネクションに送信
    ///
    /// 一部の送信失敗は許容されます（ログに記録して続行）。
    async fn broadcast(&self, targets: &[ConnectionId], content: &str);
}
