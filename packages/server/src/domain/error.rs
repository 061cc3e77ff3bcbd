//! ドメイン層のエラー定義
//!
//! すべてリクエストスコープで回復可能なエラーであり、発生元のコネクションに
//! `error` イベントとして通知されます。接続の切断や共有状態の破壊には
//! つながりません。

use thiserror::Error;

/// セッション層のエラー分類
///
/// ワイヤ上では `kind()` の文字列が `error` イベントの `kind` として送られます。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("room not found")]
    RoomNotFound,

    #[error("room is full")]
    RoomFull,

    #[error("room code '{0}' already exists")]
    DuplicateCode(String),

    #[error("connection has not joined a room")]
    NotInRoom,

    #[error("connection has already joined a room")]
    AlreadyInRoom,

    #[error("not your turn")]
    NotYourTurn,

    #[error("position already taken")]
    CellOccupied,

    #[error("game is not in progress")]
    GameNotPlaying,

    #[error("position must be between 0 and 8")]
    InvalidCellIndex,

    #[error("invalid room code: '{0}'")]
    InvalidRoomCode(String),

    #[error("invalid nickname: '{0}'")]
    InvalidNickname(String),
}

impl SessionError {
    /// `error` イベントの `kind` フィールドに載せる識別子
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::RoomNotFound => "room_not_found",
            SessionError::RoomFull => "room_full",
            SessionError::DuplicateCode(_) => "duplicate_code",
            SessionError::NotInRoom => "not_in_room",
            SessionError::AlreadyInRoom => "already_in_room",
            SessionError::NotYourTurn => "not_your_turn",
            SessionError::CellOccupied => "cell_occupied",
            SessionError::GameNotPlaying => "game_not_playing",
            SessionError::InvalidCellIndex => "invalid_cell_index",
            SessionError::InvalidRoomCode(_) => "invalid_room_code",
            SessionError::InvalidNickname(_) => "invalid_nickname",
        }
    }
}

/// メッセージ送信（push）のエラー
#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
