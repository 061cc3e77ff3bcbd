//! 対局結果記録（StatsRecorder）の実装
//!
//! コアは結果ファクトを fire-and-forget で発行するだけで、集計は外部の
//! 責務です。ここでは構造化ログとして出力する実装を提供します。
//! 将来的に HTTP / メッセージキューへの発行に差し替え可能です。

use async_trait::async_trait;

use crate::domain::{GameResultFact, StatsRecorder};

/// 構造化ログに対局結果を出力する StatsRecorder 実装
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingStatsRecorder;

impl LoggingStatsRecorder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StatsRecorder for LoggingStatsRecorder {
    async fn record(&self, fact: GameResultFact) {
        tracing::info!(
            game_id = %fact.game_id,
            player1 = %fact.player1,
            player2 = %fact.player2,
            outcome = fact.outcome.as_str(),
            total_moves = fact.total_moves,
            "game result recorded"
        );
    }
}
