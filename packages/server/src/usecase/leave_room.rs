//! UseCase: ルーム退出・切断処理
//!
//! 明示的な leave_room と、トランスポート切断の両方がこのユースケースを
//! 通ります。切断はトランスポート層が合成した leave と同じ形のイベント
//! として扱われるため、ルーム単位の直列化を必ず経由します（着手との
//! 競合がアウトオブバンドで起きることはありません）。

use std::sync::Arc;

use marubatsu_shared::time::Clock;

use crate::domain::{
    ConnectionDirectory, ConnectionId, GameStatus, Nickname, RoomCode, RoomRegistry, SessionError,
    Timestamp,
};

/// 退出処理の結果
#[derive(Debug, Clone)]
pub struct RoomLeft {
    pub room_code: RoomCode,
    pub nickname: Nickname,
    /// 残っているルーム内コネクション（player_disconnected の送信先）
    pub remaining: Vec<ConnectionId>,
    /// この退出によりセッションが中断されたか
    pub aborted: bool,
    /// この退出によりルームが破棄されたか
    pub room_removed: bool,
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（ルーム保管の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// コネクション台帳
    connections: Arc<ConnectionDirectory>,
    /// Clock（時刻取得の抽象化）
    clock: Arc<dyn Clock>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
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

    /// 退出を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 退出するコネクション
    /// * `expected_code` - 明示的な leave_room が指定したルームコード。
    ///   参加中のルームと一致しない場合は `NotInRoom` で失敗します。
    ///   切断経由の場合は `None`。
    ///
    /// # Returns
    ///
    /// * `Ok(Some(RoomLeft))` - 退出が行われた
    /// * `Ok(None)` - コネクションはどのルームにも参加していなかった
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        expected_code: Option<&RoomCode>,
    ) -> Result<Option<RoomLeft>, SessionError> {
        // 1. 参加情報の確認（明示的 leave のコード不一致は削除せずに拒否）
        if let Some(expected) = expected_code {
            match self.connections.get(&connection_id).await {
                Some(assignment) if &assignment.room_code == expected => {}
                _ => return Err(SessionError::NotInRoom),
            }
        }

        // 2. 台帳から削除
        let Some(assignment) = self.connections.remove(&connection_id).await else {
            return Ok(None);
        };

        // 3. ルームがまだあれば、排他セクション内で占有者削除と中断
        let Some(shared) = self.registry.find(&assignment.room_code).await else {
            return Ok(None);
        };

        let (left, disposable) = {
            let mut room = shared.lock().await;
            room.remove_occupant(&connection_id);

            let was_playing = room.session().status() != GameStatus::Finished;
            if was_playing {
                room.session_mut().abort();
            }
            room.touch(Timestamp::new(self.clock.now_jst_millis()));

            let left = RoomLeft {
                room_code: assignment.room_code.clone(),
                nickname: assignment.nickname.clone(),
                remaining: room.connection_ids(),
                aborted: was_playing,
                room_removed: room.is_disposable(),
            };
            (left, room.is_disposable())
        };

        // 4. 空になったルームを破棄（ロック解放後、no-op 安全）
        if disposable {
            self.registry.remove(&assignment.room_code).await;
        }

        tracing::info!(
            "Connection '{}' left room '{}' (aborted: {}, removed: {})",
            connection_id,
            left.room_code,
            left.aborted,
            left.room_removed
        );
        Ok(Some(left))
    }
}
