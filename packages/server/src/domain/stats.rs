//! 対局結果の記録インターフェース
//!
//! 決着（勝敗または引き分け）した対局の結果を外部集計向けに
//! fire-and-forget で通知します。コアは統計を読み返しません。
//! 中断（切断による終了）は記録されません。

use async_trait::async_trait;

use crate::domain::{game::GameId, values::Nickname};

/// 決着の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResultOutcome {
    Player1Win,
    Player2Win,
    Draw,
}

impl GameResultOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameResultOutcome::Player1Win => "player1_win",
            GameResultOutcome::Player2Win => "player2_win",
            GameResultOutcome::Draw => "draw",
        }
    }
}

/// 記録される対局結果のファクト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResultFact {
    pub game_id: GameId,
    pub player1: Nickname,
    pub player2: Nickname,
    pub outcome: GameResultOutcome,
    pub total_moves: u32,
}

/// 対局結果の記録先の抽象化
///
/// 実装は記録に失敗しても対局処理を失敗させてはなりません。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRecorder: Send + Sync {
    /// 対局結果を記録する（fire-and-forget）
    async fn record(&self, fact: GameResultFact);
}
