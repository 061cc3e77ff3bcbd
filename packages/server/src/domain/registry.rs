//! Room Registry trait 定義
//!
//! ドメイン層が必要とするルーム保管のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    error::SessionError,
    room::{Room, RoomSummary},
    values::{RoomCode, Timestamp},
};

/// ルーム単位の排他セクション
///
/// ルームへの全ての変更操作（join / move / leave）はこの Mutex を
/// 保持して実行されます。Registry の外側のロックは保持しません。
pub type SharedRoom = Arc<Mutex<Room>>;

/// Room Registry trait
///
/// ルームコード → ルームの対応を管理し、作成・検索・一覧・削除を提供します。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// ルームを登録する
    ///
    /// 同じコードのルームが既に存在する場合は `DuplicateCode` で失敗します。
    async fn create(&self, room: Room) -> Result<SharedRoom, SessionError>;

    /// コードでルームを検索する
    async fn find(&self, code: &RoomCode) -> Option<SharedRoom>;

    /// public なルームのサマリ一覧を取得する（コード昇順）
    async fn list_public(&self) -> Vec<RoomSummary>;

    /// ルームを削除する（存在しないコードに対しては no-op）
    async fn remove(&self, code: &RoomCode) -> bool;

    /// 登録中のルーム数
    async fn count(&self) -> usize;

    /// 占有者ゼロのままアイドル状態のルームを回収し、削除数を返す
    async fn remove_idle_since(&self, cutoff: Timestamp) -> usize;
}
