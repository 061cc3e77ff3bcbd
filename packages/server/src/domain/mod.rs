//! ドメイン層
//!
//! ゲームのルール評価・セッション状態機械・ルームといったドメインモデルと、
//! Infrastructure 層が実装するインターフェース（Registry, MessagePusher,
//! StatsRecorder）を定義します。
//!
//! ## 依存性の逆転（DIP）
//!
//! - ドメイン層が必要とするインターフェースをドメイン層自身が定義
//! - Infrastructure 層がドメイン層のインターフェースに依存
//! - ドメイン層は Infrastructure 層に依存しない

mod board;
mod connection;
mod error;
mod game;
mod pusher;
mod registry;
mod room;
mod stats;
mod values;

pub use board::{Board, Mark, MoveOutcome, WIN_LINES};
pub use connection::{Assignment, ConnectionDirectory, ConnectionId};
pub use error::{MessagePushError, SessionError};
pub use game::{GameId, GameSession, GameStatus, JoinedSlot, MoveApplied, PlayerNumber, Winner};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::{RoomRegistry, SharedRoom};
pub use room::{Occupant, Room, RoomDetail, RoomSummary, Visibility};
pub use stats::{GameResultFact, GameResultOutcome, StatsRecorder};
#[cfg(test)]
pub use stats::MockStatsRecorder;
pub use values::{Nickname, RoomCode, Timestamp};
