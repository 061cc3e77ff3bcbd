//! HTTP API endpoint handlers.
//!
//! 一覧サービス（ルーム作成・一覧・詳細）はリクエスト/レスポンス型の
//! 単純な CRUD であり、リアルタイム経路とはスナップショット経由でのみ
//! 関わります。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{SessionError, Visibility},
    infrastructure::dto::http::{CreateRoomRequest, ErrorResponse, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of public rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let summaries = state.list_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let dtos: Vec<RoomSummaryDto> = summaries.into_iter().map(RoomSummaryDto::from).collect();
    Json(dtos)
}

/// Get room detail by code
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_code): Path<String>,
) -> Result<Json<RoomDetailDto>, (StatusCode, Json<ErrorResponse>)> {
    let detail = state
        .get_room_detail_usecase
        .execute(room_code)
        .await
        .map_err(error_response)?;

    Ok(Json(RoomDetailDto::from(detail)))
}

/// Create a new room
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomSummaryDto>), (StatusCode, Json<ErrorResponse>)> {
    let visibility = if request.is_public {
        Visibility::Public
    } else {
        Visibility::Private
    };

    let summary = state
        .create_room_usecase
        .execute(request.name, request.code, visibility, request.created_by)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(RoomSummaryDto::from(summary))))
}

/// SessionError を HTTP ステータスとエラーレスポンスに変換
fn error_response(error: SessionError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &error {
        SessionError::RoomNotFound => StatusCode::NOT_FOUND,
        SessionError::DuplicateCode(_)
        | SessionError::InvalidRoomCode(_)
        | SessionError::InvalidNickname(_) => StatusCode::BAD_REQUEST,
        SessionError::RoomFull => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            detail: error.to_string(),
        }),
    )
}
