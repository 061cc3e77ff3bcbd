//! UseCase: 着手処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - MakeMoveUseCase::execute() メソッド
//! - 着手の検証・適用・決着時の結果記録
//!
//! ### なぜこのテストが必要か
//! - 権威的な着手検証（手番、マスの空き、セッション状態）の保証
//! - 決着した対局のみが StatsRecorder に記録されることの保証
//! - 失敗した着手が状態を一切変更しないことの保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: 継続する着手、勝利する着手、引き分けになる着手
//! - 異常系: NotInRoom / NotYourTurn / CellOccupied / GameNotPlaying
//! - 並行系: 同一ルームへの同時着手はルームの Mutex により全順序で適用

use std::sync::Arc;

use marubatsu_shared::time::Clock;

use crate::domain::{
    ConnectionDirectory, ConnectionId, GameId, GameResultFact, GameResultOutcome, MoveOutcome,
    PlayerNumber, RoomCode, RoomRegistry, SessionError, StatsRecorder, Timestamp, Winner,
};

/// 決着の情報（game_over イベントの材料）
#[derive(Debug, Clone)]
pub struct GameFinished {
    /// 勝者（Draw の場合はワイヤ上 0）
    pub winner: Winner,
    pub winning_line: Option<[usize; 3]>,
}

/// 着手処理の結果
#[derive(Debug, Clone)]
pub struct MoveMade {
    pub room_code: RoomCode,
    pub game_id: GameId,
    pub position: usize,
    pub player_number: PlayerNumber,
    /// 着手適用後の盤面（ワイヤエンコード）
    pub board: String,
    /// 着手適用後の手番（決着時は着手者のまま）
    pub current_turn: PlayerNumber,
    /// ルーム内全コネクション（move_made / game_over の送信先）
    pub targets: Vec<ConnectionId>,
    pub finished: Option<GameFinished>,
}

/// 着手のユースケース
pub struct MakeMoveUseCase {
    /// Registry（ルーム保管の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// コネクション台帳
    connections: Arc<ConnectionDirectory>,
    /// StatsRecorder（結果記録の抽象化）
    stats: Arc<dyn StatsRecorder>,
    /// Clock（時刻取得の抽象化）
    clock: Arc<dyn Clock>,
}

impl MakeMoveUseCase {
    /// 新しい MakeMoveUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        connections: Arc<ConnectionDirectory>,
        stats: Arc<dyn StatsRecorder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            connections,
            stats,
            clock,
        }
    }

    /// 着手を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 着手するコネクション
    /// * `game_id` - 対象セッションの ID（古いセッションへの着手を拒否）
    /// * `position` - マス番号（0〜8）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        game_id: GameId,
        position: usize,
    ) -> Result<MoveMade, SessionError> {
        // 1. コネクションの参加情報を解決
        let assignment = self
            .connections
            .get(&connection_id)
            .await
            .ok_or(SessionError::NotInRoom)?;

        // 2. ルームを検索（回収済みなら NotInRoom 相当ではなく RoomNotFound）
        let shared = self
            .registry
            .find(&assignment.room_code)
            .await
            .ok_or(SessionError::RoomNotFound)?;

        // 3. ルーム単位の排他セクションで検証と適用
        let (made, fact) = {
            let mut room = shared.lock().await;
            let session = room.session();
            if session.id() != game_id {
                // 別セッション宛の着手（作り直されたルーム等）
                return Err(SessionError::GameNotPlaying);
            }

            let applied = room
                .session_mut()
                .apply_move(assignment.player_number, position)?;
            room.touch(Timestamp::new(self.clock.now_jst_millis()));

            let session = room.session();
            let finished = match applied.outcome {
                MoveOutcome::Continue => None,
                MoveOutcome::Win(line) => Some(GameFinished {
                    winner: Winner::Player(applied.player_number),
                    winning_line: Some(line),
                }),
                MoveOutcome::Draw => Some(GameFinished {
                    winner: Winner::Draw,
                    winning_line: None,
                }),
            };

            // 決着時のみ結果ファクトを組み立てる（中断はここを通らない）
            let fact = finished.as_ref().and_then(|f| {
                let player1 = session.nickname_of(PlayerNumber::One)?.clone();
                let player2 = session.nickname_of(PlayerNumber::Two)?.clone();
                let outcome = match f.winner {
                    Winner::Player(PlayerNumber::One) => GameResultOutcome::Player1Win,
                    Winner::Player(PlayerNumber::Two) => GameResultOutcome::Player2Win,
                    Winner::Draw => GameResultOutcome::Draw,
                };
                Some(GameResultFact {
                    game_id,
                    player1,
                    player2,
                    outcome,
                    total_moves: session.total_moves(),
                })
            });

            let made = MoveMade {
                room_code: assignment.room_code.clone(),
                game_id,
                position: applied.position,
                player_number: applied.player_number,
                board: session.board().encode(),
                current_turn: session.turn(),
                targets: room.connection_ids(),
                finished,
            };
            (made, fact)
        };

        // 4. 結果記録は fire-and-forget（ルームのロック解放後）
        if let Some(fact) = fact {
            self.stats.record(fact).await;
        }

        Ok(made)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockStatsRecorder, Nickname, Room, Visibility},
        infrastructure::registry::InMemoryRoomRegistry,
        usecase::JoinRoomUseCase,
    };
    use marubatsu_shared::time::FixedClock;
    use uuid::Uuid;

    struct Fixture {
        make_move: MakeMoveUseCase,
        game_id: GameId,
        conn1: ConnectionId,
        conn2: ConnectionId,
    }

    /// 2 人参加済み（playing）のルームを組み立てる
    async fn playing_fixture(stats: Arc<dyn StatsRecorder>) -> Fixture {
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

        let join = JoinRoomUseCase::new(registry.clone(), connections.clone(), clock.clone());
        let conn1 = Uuid::new_v4();
        let conn2 = Uuid::new_v4();
        let joined = join
            .execute(conn1, "ABC123".to_string(), "alice".to_string())
            .await
            .unwrap();
        join.execute(conn2, "ABC123".to_string(), "bob".to_string())
            .await
            .unwrap();

        Fixture {
            make_move: MakeMoveUseCase::new(registry, connections, stats, clock),
            game_id: joined.game_id,
            conn1,
            conn2,
        }
    }

    fn no_stats() -> Arc<MockStatsRecorder> {
        let mut mock = MockStatsRecorder::new();
        mock.expect_record().times(0);
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_continuing_move_flips_the_turn() {
        // テスト項目: 継続する着手で盤面が更新され手番が交代する
        // given (前提条件):
        let fixture = playing_fixture(no_stats()).await;

        // when (操作):
        let made = fixture
            .make_move
            .execute(fixture.conn1, fixture.game_id, 4)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(made.board, "000010000");
        assert_eq!(made.current_turn, PlayerNumber::Two);
        assert_eq!(made.targets.len(), 2);
        assert!(made.finished.is_none());
    }

    #[tokio::test]
    async fn test_move_without_joining_fails_with_not_in_room() {
        // テスト項目: 未参加コネクションの着手は NotInRoom
        // given (前提条件):
        let fixture = playing_fixture(no_stats()).await;

        // when (操作):
        let result = fixture
            .make_move
            .execute(Uuid::new_v4(), fixture.game_id, 0)
            .await;

        // then (期待する結果):
        assert_eq!(result.err(), Some(SessionError::NotInRoom));
    }

    #[tokio::test]
    async fn test_move_out_of_turn_fails() {
        // テスト項目: 手番でないプレイヤーの着手は NotYourTurn
        // given (前提条件):
        let fixture = playing_fixture(no_stats()).await;

        // when (操作):
        let result = fixture
            .make_move
            .execute(fixture.conn2, fixture.game_id, 0)
            .await;

        // then (期待する結果):
        assert_eq!(result.err(), Some(SessionError::NotYourTurn));
    }

    #[tokio::test]
    async fn test_move_with_stale_game_id_fails() {
        // テスト項目: 現在のセッションと異なる game_id は GameNotPlaying
        // given (前提条件):
        let fixture = playing_fixture(no_stats()).await;

        // when (操作):
        let result = fixture
            .make_move
            .execute(fixture.conn1, Uuid::new_v4(), 0)
            .await;

        // then (期待する結果):
        assert_eq!(result.err(), Some(SessionError::GameNotPlaying));
    }

    #[tokio::test]
    async fn test_winning_move_finishes_and_records_the_result() {
        // テスト項目: 勝利する着手で決着し、結果が 1 回だけ記録される
        // given (前提条件): 記録されるファクトを検証する mock
        let mut mock = MockStatsRecorder::new();
        mock.expect_record()
            .withf(|fact| {
                fact.player1.as_str() == "alice"
                    && fact.player2.as_str() == "bob"
                    && fact.outcome == GameResultOutcome::Player1Win
                    && fact.total_moves == 5
            })
            .times(1)
            .return_const(());
        let fixture = playing_fixture(Arc::new(mock)).await;

        // when (操作): 0(P1), 4(P2), 1(P1), 3(P2), 2(P1) で上段が揃う
        for (conn, position) in [
            (fixture.conn1, 0),
            (fixture.conn2, 4),
            (fixture.conn1, 1),
            (fixture.conn2, 3),
        ] {
            fixture
                .make_move
                .execute(conn, fixture.game_id, position)
                .await
                .unwrap();
        }
        let made = fixture
            .make_move
            .execute(fixture.conn1, fixture.game_id, 2)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(made.board, "111220000");
        let finished = made.finished.unwrap();
        assert_eq!(finished.winner, Winner::Player(PlayerNumber::One));
        assert_eq!(finished.winning_line, Some([0, 1, 2]));
    }

    #[tokio::test]
    async fn test_move_after_game_over_fails_with_game_not_playing() {
        // テスト項目: 決着後の着手は GameNotPlaying
        // given (前提条件): プレイヤー 1 が勝利済み
        let mut mock = MockStatsRecorder::new();
        mock.expect_record().times(1).return_const(());
        let fixture = playing_fixture(Arc::new(mock)).await;
        for (conn, position) in [
            (fixture.conn1, 0),
            (fixture.conn2, 4),
            (fixture.conn1, 1),
            (fixture.conn2, 3),
            (fixture.conn1, 2),
        ] {
            fixture
                .make_move
                .execute(conn, fixture.game_id, position)
                .await
                .unwrap();
        }

        // when (操作):
        let result = fixture
            .make_move
            .execute(fixture.conn2, fixture.game_id, 5)
            .await;

        // then (期待する結果):
        assert_eq!(result.err(), Some(SessionError::GameNotPlaying));
    }

    #[tokio::test]
    async fn test_simultaneous_moves_are_applied_in_a_total_order() {
        // テスト項目: 同一ルームへの同時着手はルームの Mutex により
        //             全順序で適用され、ちょうど一方だけが成功する
        // given (前提条件):
        let mut mock = MockStatsRecorder::new();
        mock.expect_record().times(0);
        let fixture = playing_fixture(Arc::new(mock)).await;

        // when (操作): 両プレイヤーが同じマスに同時に着手する
        let (r1, r2) = tokio::join!(
            fixture.make_move.execute(fixture.conn1, fixture.game_id, 4),
            fixture.make_move.execute(fixture.conn2, fixture.game_id, 4),
        );

        // then (期待する結果): P1 の着手のみ成功（P2 は手番か空きで失敗）
        assert!(r1.is_ok());
        let err = r2.unwrap_err();
        assert!(
            err == SessionError::NotYourTurn || err == SessionError::CellOccupied,
            "unexpected error: {err:?}"
        );
    }
}
