//! WebSocket メッセージの DTO
//!
//! クライアント⇔サーバ間の論理イベントを閉じた型集合として定義します。
//! JSON の `type` フィールドでタグ付けされます（snake_case）。
//!
//! 盤面のワイヤエンコードは 9 文字の位置文字列（行優先）で、
//! `0` = 空、`1` = プレイヤー 1、`2` = プレイヤー 2。この数値表現は
//! プレゼンテーション層の見た目（X/O 等）から独立しています。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// クライアント → サーバのイベント
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// ルームに参加する
    JoinRoom { room_code: String, nickname: String },
    /// 着手する（position は 0〜8）
    MakeMove { game_id: Uuid, position: usize },
    /// ルーム内チャット
    ChatMessage { message: String },
    /// ルームから退出する
    LeaveRoom { room_code: String },
}

/// サーバ → クライアントのイベント
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// 参加完了（参加したコネクションのみに送信）
    RoomJoined {
        room_code: String,
        player_number: u8,
        game_id: Uuid,
    },
    /// 他の参加者の入室（ルーム内の他コネクションに送信）
    PlayerJoined {
        nickname: String,
        players_count: usize,
    },
    /// ペアリング完了による対局開始（ルーム内全員に送信）
    GameStarted {
        game_id: Uuid,
        player1: String,
        player2: String,
        current_turn: u8,
    },
    /// 着手の反映（ルーム内全員に送信）
    MoveMade {
        game_id: Uuid,
        position: usize,
        player_number: u8,
        board: String,
        current_turn: u8,
    },
    /// 対局終了（winner: 0 = 引き分け、それ以外はプレイヤー番号）
    GameOver {
        game_id: Uuid,
        winner: u8,
        winning_line: Option<[usize; 3]>,
        board: String,
    },
    /// 参加者の切断（残りのコネクションに送信）
    PlayerDisconnected { nickname: String },
    /// チャット（送信者以外のルーム内コネクションに送信）
    ChatMessage {
        nickname: String,
        message: String,
        timestamp: i64,
    },
    /// エラー（発生元のコネクションのみに送信）
    Error { kind: String, message: String },
}

impl ServerMessage {
    /// JSON 文字列にシリアライズ
    ///
    /// ServerMessage は常にシリアライズ可能な値のみで構成されるため、
    /// 失敗は論理エラーとして扱います。
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize ServerMessage: {}", e);
            r#"{"type":"error","kind":"internal","message":"serialization failed"}"#.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_is_parsed_by_type_tag() {
        // テスト項目: type タグで ClientMessage の種別が判別される
        // given (前提条件):
        let json = r#"{"type":"join_room","room_code":"abc123","nickname":"alice"}"#;

        // when (操作):
        let parsed: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            parsed,
            ClientMessage::JoinRoom {
                room_code: "abc123".to_string(),
                nickname: "alice".to_string(),
            }
        );
    }

    #[test]
    fn test_make_move_message_carries_game_id_and_position() {
        // テスト項目: make_move が game_id と position を運ぶ
        // given (前提条件):
        let game_id = Uuid::new_v4();
        let json = format!(r#"{{"type":"make_move","game_id":"{game_id}","position":4}}"#);

        // when (操作):
        let parsed: ClientMessage = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(parsed, ClientMessage::MakeMove { game_id, position: 4 });
    }

    #[test]
    fn test_unknown_type_fails_to_parse() {
        // テスト項目: 未知の type はパースエラーになる
        let json = r#"{"type":"teleport","room_code":"abc123"}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_server_message_serializes_with_snake_case_tag() {
        // テスト項目: ServerMessage が snake_case の type タグ付きで出力される
        // given (前提条件):
        let message = ServerMessage::PlayerDisconnected {
            nickname: "bob".to_string(),
        };

        // when (操作):
        let json = message.to_json();

        // then (期待する結果):
        assert_eq!(
            json,
            r#"{"type":"player_disconnected","nickname":"bob"}"#
        );
    }

    #[test]
    fn test_game_over_message_encodes_winner_and_board() {
        // テスト項目: game_over が勝者・ライン・盤面エンコードを運ぶ
        // given (前提条件):
        let game_id = Uuid::new_v4();
        let message = ServerMessage::GameOver {
            game_id,
            winner: 1,
            winning_line: Some([0, 1, 2]),
            board: "111220000".to_string(),
        };

        // when (操作):
        let json = message.to_json();

        // then (期待する結果):
        assert!(json.contains(r#""type":"game_over""#));
        assert!(json.contains(r#""winner":1"#));
        assert!(json.contains(r#""winning_line":[0,1,2]"#));
        assert!(json.contains(r#""board":"111220000""#));
    }
}
