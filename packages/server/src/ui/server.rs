//! Server execution logic.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use marubatsu_shared::time::Clock;
use tower_http::trace::TraceLayer;

use crate::domain::{RoomRegistry, Timestamp};

use super::{
    handler::{
        http::{create_room, get_room_detail, get_rooms, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// アイドルルーム回収の実行間隔
const REAP_INTERVAL: Duration = Duration::from_secs(60);

/// Realtime tic-tac-toe session server
///
/// This struct encapsulates the server configuration and provides methods
/// to run the server.
pub struct Server {
    /// Shared application state（各ユースケースと MessagePusher）
    app_state: Arc<AppState>,
    /// Registry（アイドルルーム回収用）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（時刻取得の抽象化）
    clock: Arc<dyn Clock>,
    /// 占有者ゼロのルームを回収するまでのアイドル時間
    room_idle_timeout: Duration,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        app_state: Arc<AppState>,
        registry: Arc<dyn RoomRegistry>,
        clock: Arc<dyn Clock>,
        room_idle_timeout: Duration,
    ) -> Self {
        Self {
            app_state,
            registry,
            clock,
            room_idle_timeout,
        }
    }

    /// Run the session server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // アイドルルーム回収タスク（クリティカルパス外）
        let reaper = spawn_room_reaper(
            self.registry.clone(),
            self.clock.clone(),
            self.room_idle_timeout,
        );

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms", post(create_room))
            .route("/api/rooms/{room_code}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!("Session server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        reaper.abort();
        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// 占有者ゼロのままアイドルなルームを定期的に回収するタスクを起動
fn spawn_room_reaper(
    registry: Arc<dyn RoomRegistry>,
    clock: Arc<dyn Clock>,
    idle_timeout: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(REAP_INTERVAL);
        // 起動直後の tick はスキップ
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let cutoff = Timestamp::new(clock.now_jst_millis() - idle_timeout.as_millis() as i64);
            let removed = registry.remove_idle_since(cutoff).await;
            if removed > 0 {
                tracing::info!("Reaped {} idle room(s)", removed);
            }
        }
    })
}
