//! Realtime tic-tac-toe session server.
//!
//! Pairs two players per room, serializes their moves, and broadcasts
//! game events over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin marubatsu-server
//! cargo run --bin marubatsu-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use marubatsu_server::{
    domain::ConnectionDirectory,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry,
        stats::LoggingStatsRecorder,
    },
    ui::{AppState, Server},
    usecase::{
        CreateRoomUseCase, GetRoomDetailUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        ListRoomsUseCase, MakeMoveUseCase, RelayChatUseCase,
    },
};
use marubatsu_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "marubatsu-server")]
#[command(about = "Realtime tic-tac-toe session server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Seconds an empty room may stay idle before it is reclaimed
    #[arg(long, default_value = "300")]
    room_idle_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. MessagePusher
    // 3. ConnectionDirectory / Clock / StatsRecorder
    // 4. UseCases
    // 5. AppState / Server

    // 1. Create Registry (in-memory database)
    let registry = Arc::new(InMemoryRoomRegistry::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create shared collaborators
    let connections = Arc::new(ConnectionDirectory::new());
    let clock = Arc::new(SystemClock);
    let stats = Arc::new(LoggingStatsRecorder::new());

    // 4. Create UseCases
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(registry.clone(), clock.clone()));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(registry.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        connections.clone(),
        clock.clone(),
    ));
    let make_move_usecase = Arc::new(MakeMoveUseCase::new(
        registry.clone(),
        connections.clone(),
        stats,
        clock.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        registry.clone(),
        connections.clone(),
        clock.clone(),
    ));
    let relay_chat_usecase = Arc::new(RelayChatUseCase::new(
        registry.clone(),
        connections,
        clock.clone(),
    ));

    // 5. Create and run the server
    let app_state = Arc::new(AppState {
        create_room_usecase,
        list_rooms_usecase,
        get_room_detail_usecase,
        join_room_usecase,
        make_move_usecase,
        leave_room_usecase,
        relay_chat_usecase,
        message_pusher,
    });
    let server = Server::new(
        app_state,
        registry,
        clock,
        Duration::from_secs(args.room_idle_secs),
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
