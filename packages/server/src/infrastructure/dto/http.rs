//! HTTP API のリクエスト/レスポンス DTO

use serde::{Deserialize, Serialize};

/// ルーム作成リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub code: String,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
    pub created_by: String,
}

fn default_is_public() -> bool {
    true
}

/// ルーム一覧用のサマリ DTO
#[derive(Debug, Clone, Serialize)]
pub struct RoomSummaryDto {
    pub code: String,
    pub name: String,
    pub is_public: bool,
    pub status: String,
    pub players_count: usize,
    pub created_at: String,
}

/// ルーム詳細 DTO
#[derive(Debug, Clone, Serialize)]
pub struct RoomDetailDto {
    pub code: String,
    pub name: String,
    pub is_public: bool,
    pub status: String,
    pub players_count: usize,
    pub created_at: String,
    pub created_by: String,
    pub occupants: Vec<String>,
}

/// エラーレスポンス
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
