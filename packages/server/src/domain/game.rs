//! ゲームセッション（状態機械）
//!
//! ルームごとに 1 つ存在する対局の権威的状態。盤面・手番・プレイヤースロット・
//! ステータスを所有し、`waiting → playing → finished` の一方向にのみ遷移します。
//!
//! 並行性はここでは扱いません。呼び出し側（UseCase 層）がルーム単位の排他
//! セクション内でのみ変更することを保証します。

use uuid::Uuid;

use crate::domain::{
    board::{Board, Mark, MoveOutcome},
    error::SessionError,
    values::Nickname,
};

use super::connection::ConnectionId;

/// ゲームセッション ID
pub type GameId = Uuid;

/// プレイヤー番号（1 または 2）
///
/// 最初に join した参加者が常にプレイヤー 1（マーク A）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerNumber {
    One,
    Two,
}

impl PlayerNumber {
    pub fn mark(&self) -> Mark {
        match self {
            PlayerNumber::One => Mark::A,
            PlayerNumber::Two => Mark::B,
        }
    }

    pub fn other(&self) -> PlayerNumber {
        match self {
            PlayerNumber::One => PlayerNumber::Two,
            PlayerNumber::Two => PlayerNumber::One,
        }
    }

    /// ワイヤ上の数値表現（1 / 2）
    pub fn as_u8(&self) -> u8 {
        match self {
            PlayerNumber::One => 1,
            PlayerNumber::Two => 2,
        }
    }
}

/// セッションのステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Waiting,
    Playing,
    Finished,
}

impl GameStatus {
    /// HTTP レスポンス等で使う文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Waiting => "waiting",
            GameStatus::Playing => "playing",
            GameStatus::Finished => "finished",
        }
    }
}

/// 決着の内容
///
/// 中断（切断による終了）は `winner() == None` のまま finished になります。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Draw,
    Player(PlayerNumber),
}

impl Winner {
    /// ワイヤ上の数値表現（0 = 引き分け、それ以外はプレイヤー番号）
    pub fn as_u8(&self) -> u8 {
        match self {
            Winner::Draw => 0,
            Winner::Player(n) => n.as_u8(),
        }
    }
}

/// プレイヤースロット（参加者 ID とコネクションの紐付け）
#[derive(Debug, Clone)]
struct PlayerSlot {
    nickname: Nickname,
    connection_id: ConnectionId,
}

/// join の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinedSlot {
    /// 割り当てられたプレイヤー番号
    pub player_number: PlayerNumber,
    /// この join でペアリングが完了し、対局が開始したか
    pub started: bool,
}

/// apply_move の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveApplied {
    pub position: usize,
    pub player_number: PlayerNumber,
    pub outcome: MoveOutcome,
}

/// ゲームセッション
#[derive(Debug, Clone)]
pub struct GameSession {
    id: GameId,
    board: Board,
    turn: PlayerNumber,
    status: GameStatus,
    slots: [Option<PlayerSlot>; 2],
    winner: Option<Winner>,
    winning_line: Option<[usize; 3]>,
    total_moves: u32,
}

impl GameSession {
    /// 新しいセッションを作成（waiting、空盤面、スロット未割り当て）
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            board: Board::new(),
            turn: PlayerNumber::One,
            status: GameStatus::Waiting,
            slots: [None, None],
            winner: None,
            winning_line: None,
            total_moves: 0,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> PlayerNumber {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.winning_line
    }

    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    /// スロットのニックネームを取得
    pub fn nickname_of(&self, player: PlayerNumber) -> Option<&Nickname> {
        self.slot(player).map(|s| &s.nickname)
    }

    /// コネクションに割り当てられたプレイヤー番号を取得
    pub fn player_number_of(&self, connection_id: &ConnectionId) -> Option<PlayerNumber> {
        if self.slot(PlayerNumber::One).is_some_and(|s| &s.connection_id == connection_id) {
            Some(PlayerNumber::One)
        } else if self.slot(PlayerNumber::Two).is_some_and(|s| &s.connection_id == connection_id) {
            Some(PlayerNumber::Two)
        } else {
            None
        }
    }

    /// 参加者をスロットに割り当てる
    ///
    /// 空いている最初のスロットを埋め、スロット 2 が埋まった時点で
    /// `playing`（手番 = プレイヤー 1）に遷移します。
    pub fn join(
        &mut self,
        nickname: Nickname,
        connection_id: ConnectionId,
    ) -> Result<JoinedSlot, SessionError> {
        if self.status != GameStatus::Waiting {
            return Err(SessionError::RoomFull);
        }
        match &mut self.slots {
            [slot @ None, _] => {
                *slot = Some(PlayerSlot {
                    nickname,
                    connection_id,
                });
                Ok(JoinedSlot {
                    player_number: PlayerNumber::One,
                    started: false,
                })
            }
            [Some(_), slot @ None] => {
                *slot = Some(PlayerSlot {
                    nickname,
                    connection_id,
                });
                self.status = GameStatus::Playing;
                self.turn = PlayerNumber::One;
                Ok(JoinedSlot {
                    player_number: PlayerNumber::Two,
                    started: true,
                })
            }
            [Some(_), Some(_)] => Err(SessionError::RoomFull),
        }
    }

    /// 一手を適用する
    ///
    /// 検証順: ステータス → マス番号 → 手番 → マスの空き。
    /// 失敗した場合、盤面と手番は一切変更されません。
    pub fn apply_move(
        &mut self,
        player: PlayerNumber,
        position: usize,
    ) -> Result<MoveApplied, SessionError> {
        if self.status != GameStatus::Playing {
            return Err(SessionError::GameNotPlaying);
        }
        if position >= 9 {
            return Err(SessionError::InvalidCellIndex);
        }
        if player != self.turn {
            return Err(SessionError::NotYourTurn);
        }
        if !self.board.is_empty_at(position) {
            return Err(SessionError::CellOccupied);
        }

        let (next_board, outcome) = self.board.place(position, player.mark());
        self.board = next_board;
        self.total_moves += 1;

        match outcome {
            MoveOutcome::Continue => {
                self.turn = player.other();
            }
            MoveOutcome::Win(line) => {
                self.status = GameStatus::Finished;
                self.winner = Some(Winner::Player(player));
                self.winning_line = Some(line);
            }
            MoveOutcome::Draw => {
                self.status = GameStatus::Finished;
                self.winner = Some(Winner::Draw);
            }
        }

        Ok(MoveApplied {
            position,
            player_number: player,
            outcome,
        })
    }

    /// 参加者の離脱によりセッションを中断する
    ///
    /// finished 以外のステータスから強制的に finished（勝者なし）へ遷移します。
    /// すでに finished の場合は何もしません。
    pub fn abort(&mut self) {
        if self.status != GameStatus::Finished {
            self.status = GameStatus::Finished;
            // 中断は勝敗なし（forfeiture は採用しない）
            self.winner = None;
        }
    }

    fn slot(&self, player: PlayerNumber) -> Option<&PlayerSlot> {
        match player {
            PlayerNumber::One => self.slots[0].as_ref(),
            PlayerNumber::Two => self.slots[1].as_ref(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
