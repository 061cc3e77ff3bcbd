//! Data Transfer Objects (DTOs)
//!
//! DTO はプロトコルごとに分かれています:
//! - `websocket`: WebSocket メッセージの DTO（インバウンド/アウトバウンド）
//! - `http`: HTTP API のリクエスト/レスポンス DTO

pub mod conversion;
pub mod http;
pub mod websocket;
