//! UseCase: チャット中継
//!
//! ルーム内の参加者にチャットを配送します。送信者自身には送り返しません
//! （クライアント側のローカルエコーと二重になるため）。チャットは
//! 永続化されず、順序はサーバ到着順です。

use std::sync::Arc;

use marubatsu_shared::time::Clock;

use crate::domain::{
    ConnectionDirectory, ConnectionId, Nickname, RoomCode, RoomRegistry, SessionError, Timestamp,
};

/// チャット中継の結果
#[derive(Debug, Clone)]
pub struct ChatRelayed {
    pub room_code: RoomCode,
    pub nickname: Nickname,
    pub message: String,
    pub timestamp: i64,
    /// 送信者以外のルーム内コネクション
    pub targets: Vec<ConnectionId>,
}

/// チャット中継のユースケース
pub struct RelayChatUseCase {
    /// Registry（ルーム保管の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// コネクション台帳
    connections: Arc<ConnectionDirectory>,
    /// Clock（時刻取得の抽象化）
    clock: Arc<dyn Clock>,
}

impl RelayChatUseCase {
    /// 新しい RelayChatUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        connections: Arc<ConnectionDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            connections,
            clock,
        }
    }

    /// チャット中継を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元コネクション
    /// * `message` - チャット本文
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        message: String,
    ) -> Result<ChatRelayed, SessionError> {
        let assignment = self
            .connections
            .get(&connection_id)
            .await
            .ok_or(SessionError::NotInRoom)?;

        let shared = self
            .registry
            .find(&assignment.room_code)
            .await
            .ok_or(SessionError::RoomNotFound)?;

        let targets = {
            let room = shared.lock().await;
            room.connection_ids_except(&connection_id)
        };

        Ok(ChatRelayed {
            room_code: assignment.room_code,
            nickname: assignment.nickname,
            message,
            timestamp: self.clock.now_jst_millis(),
            targets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Room, Visibility},
        infrastructure::registry::InMemoryRoomRegistry,
        usecase::JoinRoomUseCase,
    };
    use marubatsu_shared::time::FixedClock;
    use uuid::Uuid;

    async fn setup() -> (JoinRoomUseCase, RelayChatUseCase) {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let connections = Arc::new(ConnectionDirectory::new());
        let clock = Arc::new(FixedClock::new(2000));

        let room = Room::new(
            RoomCode::new("ABC123").unwrap(),
            "battle".to_string(),
            Visibility::Public,
            Nickname::new("alice").unwrap(),
            Timestamp::new(1000),
        );
        registry.create(room).await.unwrap();

        (
            JoinRoomUseCase::new(registry.clone(), connections.clone(), clock.clone()),
            RelayChatUseCase::new(registry, connections, clock),
        )
    }

    #[tokio::test]
    async fn test_chat_targets_exclude_the_sender() {
        // テスト項目: チャットの配送対象に送信者が含まれない
        // given (前提条件): 2 人参加済み
        let (join, chat) = setup().await;
        let conn1 = Uuid::new_v4();
        let conn2 = Uuid::new_v4();
        join.execute(conn1, "ABC123".to_string(), "alice".to_string())
            .await
            .unwrap();
        join.execute(conn2, "ABC123".to_string(), "bob".to_string())
            .await
            .unwrap();

        // when (操作):
        let relayed = chat.execute(conn1, "yoroshiku!".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(relayed.nickname.as_str(), "alice");
        assert_eq!(relayed.message, "yoroshiku!");
        assert_eq!(relayed.timestamp, 2000);
        assert_eq!(relayed.targets, vec![conn2]);
    }

    #[tokio::test]
    async fn test_chat_without_joining_fails_with_not_in_room() {
        // テスト項目: 未参加コネクションのチャットは NotInRoom
        // given (前提条件):
        let (_, chat) = setup().await;

        // when (操作):
        let result = chat.execute(Uuid::new_v4(), "hello".to_string()).await;

        // then (期待する結果):
        assert_eq!(result.err(), Some(SessionError::NotInRoom));
    }
}
