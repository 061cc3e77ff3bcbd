//! コネクションとルームの対応管理
//!
//! 「どのコネクションがどのルームに参加しているか」というプロセス全体の
//! 可変状態を明示的なライフサイクルで管理します。接続時に登録され、
//! 切断時に同期的に削除されます。
//!
//! ルーム状態の変更はルーム単位の Mutex が直列化するため、この台帳は
//! 独立した Mutex で十分です。デッドロック回避のため、ルームのロックと
//! 同時には保持しません。

use std::collections::HashMap;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{
    game::PlayerNumber,
    values::{Nickname, RoomCode},
};

/// コネクション ID（接続ごとに採番される UUID v4）
pub type ConnectionId = Uuid;

/// コネクションの参加情報
///
/// 1 コネクションは同時に高々 1 つの `(ルームコード, プレイヤー番号)` に
/// 紐づきます。
#[derive(Debug, Clone)]
pub struct Assignment {
    pub room_code: RoomCode,
    pub nickname: Nickname,
    pub player_number: PlayerNumber,
}

/// コネクション台帳
#[derive(Debug, Default)]
pub struct ConnectionDirectory {
    inner: Mutex<HashMap<ConnectionId, Assignment>>,
}

impl ConnectionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// コネクションに参加情報を登録
    pub async fn assign(&self, connection_id: ConnectionId, assignment: Assignment) {
        let mut inner = self.inner.lock().await;
        inner.insert(connection_id, assignment);
    }

    /// コネクションの参加情報を取得
    pub async fn get(&self, connection_id: &ConnectionId) -> Option<Assignment> {
        let inner = self.inner.lock().await;
        inner.get(connection_id).cloned()
    }

    /// コネクションの参加情報を削除して返す
    pub async fn remove(&self, connection_id: &ConnectionId) -> Option<Assignment> {
        let mut inner = self.inner.lock().await;
        inner.remove(connection_id)
    }

    /// コネクションがどこかのルームに参加中かどうか
    pub async fn is_assigned(&self, connection_id: &ConnectionId) -> bool {
        let inner = self.inner.lock().await;
        inner.contains_key(connection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(code: &str, nickname: &str) -> Assignment {
        Assignment {
            room_code: RoomCode::new(code).unwrap(),
            nickname: Nickname::new(nickname).unwrap(),
            player_number: PlayerNumber::One,
        }
    }

    #[tokio::test]
    async fn test_assign_and_get_roundtrip() {
        // テスト項目: 登録した参加情報が取得できる
        // given (前提条件):
        let directory = ConnectionDirectory::new();
        let connection_id = Uuid::new_v4();

        // when (操作):
        directory.assign(connection_id, assignment("ROOM01", "alice")).await;

        // then (期待する結果):
        let found = directory.get(&connection_id).await.unwrap();
        assert_eq!(found.room_code.as_str(), "ROOM01");
        assert!(directory.is_assigned(&connection_id).await);
    }

    #[tokio::test]
    async fn test_remove_clears_the_assignment() {
        // テスト項目: 削除後は参加情報が取得できない
        // given (前提条件):
        let directory = ConnectionDirectory::new();
        let connection_id = Uuid::new_v4();
        directory.assign(connection_id, assignment("ROOM01", "alice")).await;

        // when (操作):
        let removed = directory.remove(&connection_id).await;

        // then (期待する結果):
        assert!(removed.is_some());
        assert!(directory.get(&connection_id).await.is_none());
        // 二重削除は no-op
        assert!(directory.remove(&connection_id).await.is_none());
    }
}
