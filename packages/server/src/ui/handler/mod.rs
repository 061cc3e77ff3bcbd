//! エンドポイントハンドラ
//!
//! - `websocket`: リアルタイム経路（join / move / chat / leave）
//! - `http`: 一覧サービス（ルーム作成・一覧・詳細）とヘルスチェック

pub mod http;
pub mod websocket;
