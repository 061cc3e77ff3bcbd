//! UseCase: ルーム参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加処理（プレイヤー番号割り当て、ペアリング完了判定、台帳登録）
//!
//! ### なぜこのテストが必要か
//! - 最初の参加者が常にプレイヤー 1 になることを保証
//! - 2 人目の参加で対局が開始されることを保証
//! - 満室・参加済み・存在しないルームの拒否を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: 1 人目 / 2 人目の参加
//! - 異常系: RoomNotFound / RoomFull / AlreadyInRoom

use std::sync::Arc;

use marubatsu_shared::time::Clock;

use crate::domain::{
    Assignment, ConnectionDirectory, ConnectionId, GameId, Nickname, Occupant, PlayerNumber,
    RoomCode, RoomRegistry, SessionError, Timestamp,
};

/// ペアリング完了の情報（game_started イベントの材料）
#[derive(Debug, Clone)]
pub struct StartedGame {
    pub player1: Nickname,
    pub player2: Nickname,
    pub current_turn: PlayerNumber,
}

/// 参加処理の結果
#[derive(Debug, Clone)]
pub struct RoomJoined {
    pub room_code: RoomCode,
    pub game_id: GameId,
    pub nickname: Nickname,
    pub player_number: PlayerNumber,
    pub players_count: usize,
    /// 参加者以外のルーム内コネクション（player_joined の送信先）
    pub others: Vec<ConnectionId>,
    /// ルーム内全コネクション（game_started の送信先）
    pub all: Vec<ConnectionId>,
    /// この参加でペアリングが完了した場合の対局開始情報
    pub started: Option<StartedGame>,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（ルーム保管の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// コネクション台帳
    connections: Arc<ConnectionDirectory>,
    /// Clock（時刻取得の抽象化）
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
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

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加するコネクション
    /// * `room_code` - 参加先のルームコード（未正規化でよい）
    /// * `nickname` - 参加者のニックネーム
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_code: String,
        nickname: String,
    ) -> Result<RoomJoined, SessionError> {
        let room_code = RoomCode::new(room_code)?;
        let nickname = Nickname::new(nickname)?;

        // 1. 既にどこかのルームに参加していないかチェック
        if self.connections.is_assigned(&connection_id).await {
            return Err(SessionError::AlreadyInRoom);
        }

        // 2. ルームを検索
        let shared = self
            .registry
            .find(&room_code)
            .await
            .ok_or(SessionError::RoomNotFound)?;

        // 3. ルーム単位の排他セクションでスロット割り当てとスナップショット取得
        let joined = {
            let mut room = shared.lock().await;
            if room.is_retired() {
                // 検索とロック取得の間にアイドル回収されたルーム
                return Err(SessionError::RoomNotFound);
            }
            if room.is_full() {
                return Err(SessionError::RoomFull);
            }

            let slot = room
                .session_mut()
                .join(nickname.clone(), connection_id)?;
            room.add_occupant(Occupant {
                connection_id,
                nickname: nickname.clone(),
            });
            room.touch(Timestamp::new(self.clock.now_jst_millis()));

            let session = room.session();
            let started = slot.started.then(|| StartedGame {
                // playing への遷移直後は両スロットが必ず埋まっている
                player1: session
                    .nickname_of(PlayerNumber::One)
                    .cloned()
                    .unwrap_or_else(|| nickname.clone()),
                player2: session
                    .nickname_of(PlayerNumber::Two)
                    .cloned()
                    .unwrap_or_else(|| nickname.clone()),
                current_turn: session.turn(),
            });

            RoomJoined {
                room_code: room.code().clone(),
                game_id: session.id(),
                nickname: nickname.clone(),
                player_number: slot.player_number,
                players_count: room.occupancy(),
                others: room.connection_ids_except(&connection_id),
                all: room.connection_ids(),
                started,
            }
        };

        // 4. コネクション台帳に登録（ルームのロック解放後）
        self.connections
            .assign(
                connection_id,
                Assignment {
                    room_code: joined.room_code.clone(),
                    nickname,
                    player_number: joined.player_number,
                },
            )
            .await;

        tracing::info!(
            "Connection '{}' joined room '{}' as player {}",
            connection_id,
            joined.room_code,
            joined.player_number.as_u8()
        );
        Ok(joined)
    }
}
