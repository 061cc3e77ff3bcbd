//! UI 層（トランスポート）
//!
//! axum による WebSocket / HTTP エンドポイントの受付と、
//! インバウンドメッセージの UseCase へのディスパッチを担当します。

mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
pub use state::AppState;
