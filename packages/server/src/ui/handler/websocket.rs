//! WebSocket connection handlers.
//!
//! コネクションごとに読み取りループ（インバウンドメッセージの
//! ディスパッチ）と送信ループ（チャンネルから WebSocket への書き出し）の
//! 2 タスクを動かします。トランスポートの切断は leave_room と同じ形の
//! イベントとして合成され、同じ直列化を通ります。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    domain::{ConnectionId, RoomCode, SessionError},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // コネクション ID はサーバ側で採番（接続単位の一意な識別子）
    let connection_id = Uuid::new_v4();
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_connection(connection_id, tx)
        .await;
    tracing::info!("Connection '{}' established", connection_id);

    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive messages from this connection
    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_message(&recv_state, connection_id, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // 切断を leave_room 相当のイベントとして処理（同じ直列化を通す）
    handle_disconnect(&state, connection_id).await;
}

/// インバウンドメッセージを種別ごとのハンドラへディスパッチ
///
/// リクエストスコープのエラーは発生元のコネクションにのみ `error`
/// イベントとして通知され、コネクションは維持されます。
async fn handle_client_message(state: &Arc<AppState>, connection_id: ConnectionId, text: &str) {
    tracing::debug!("Received text from '{}': {}", connection_id, text);

    let parsed = match serde_json::from_str::<ClientMessage>(text) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Failed to parse message from '{}': {}", connection_id, e);
            send_error_event(
                state,
                connection_id,
                "invalid_message",
                "message could not be parsed",
            )
            .await;
            return;
        }
    };

    let result = match parsed {
        ClientMessage::JoinRoom {
            room_code,
            nickname,
        } => handle_join(state, connection_id, room_code, nickname).await,
        ClientMessage::MakeMove { game_id, position } => {
            handle_move(state, connection_id, game_id, position).await
        }
        ClientMessage::ChatMessage { message } => handle_chat(state, connection_id, message).await,
        ClientMessage::LeaveRoom { room_code } => {
            handle_leave(state, connection_id, room_code).await
        }
    };

    if let Err(e) = result {
        tracing::debug!("Request from '{}' rejected: {}", connection_id, e);
        send_error_event(state, connection_id, e.kind(), &e.to_string()).await;
    }
}

async fn send_error_event(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    kind: &str,
    message: &str,
) {
    let event = ServerMessage::Error {
        kind: kind.to_string(),
        message: message.to_string(),
    };
    if let Err(e) = state
        .message_pusher
        .push_to(&connection_id, &event.to_json())
        .await
    {
        tracing::warn!("Failed to send error event to '{}': {}", connection_id, e);
    }
}

async fn handle_join(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    room_code: String,
    nickname: String,
) -> Result<(), SessionError> {
    let joined = state
        .join_room_usecase
        .execute(connection_id, room_code, nickname)
        .await?;

    // room_joined → 参加したコネクションのみ
    let room_joined = ServerMessage::RoomJoined {
        room_code: joined.room_code.as_str().to_string(),
        player_number: joined.player_number.as_u8(),
        game_id: joined.game_id,
    };
    if let Err(e) = state
        .message_pusher
        .push_to(&connection_id, &room_joined.to_json())
        .await
    {
        tracing::warn!("Failed to send room_joined to '{}': {}", connection_id, e);
    }

    // player_joined → ルーム内の他コネクション
    let player_joined = ServerMessage::PlayerJoined {
        nickname: joined.nickname.as_str().to_string(),
        players_count: joined.players_count,
    };
    state
        .message_pusher
        .broadcast(&joined.others, &player_joined.to_json())
        .await;

    // game_started → ペアリング完了時、ルーム内全員
    if let Some(started) = joined.started {
        let game_started = ServerMessage::GameStarted {
            game_id: joined.game_id,
            player1: started.player1.as_str().to_string(),
            player2: started.player2.as_str().to_string(),
            current_turn: started.current_turn.as_u8(),
        };
        state
            .message_pusher
            .broadcast(&joined.all, &game_started.to_json())
            .await;
        tracing::info!("Game '{}' started in room '{}'", joined.game_id, joined.room_code);
    }

    Ok(())
}

async fn handle_move(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    game_id: Uuid,
    position: usize,
) -> Result<(), SessionError> {
    let made = state
        .make_move_usecase
        .execute(connection_id, game_id, position)
        .await?;

    // move_made → ルーム内全員
    let move_made = ServerMessage::MoveMade {
        game_id: made.game_id,
        position: made.position,
        player_number: made.player_number.as_u8(),
        board: made.board.clone(),
        current_turn: made.current_turn.as_u8(),
    };
    state
        .message_pusher
        .broadcast(&made.targets, &move_made.to_json())
        .await;

    // game_over → 決着時、ルーム内全員
    if let Some(finished) = made.finished {
        let game_over = ServerMessage::GameOver {
            game_id: made.game_id,
            winner: finished.winner.as_u8(),
            winning_line: finished.winning_line,
            board: made.board,
        };
        state
            .message_pusher
            .broadcast(&made.targets, &game_over.to_json())
            .await;
        tracing::info!("Game '{}' finished in room '{}'", made.game_id, made.room_code);
    }

    Ok(())
}

async fn handle_chat(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    message: String,
) -> Result<(), SessionError> {
    // 空のチャットは黙って無視する
    if message.trim().is_empty() {
        return Ok(());
    }

    let relayed = state
        .relay_chat_usecase
        .execute(connection_id, message)
        .await?;

    let chat = ServerMessage::ChatMessage {
        nickname: relayed.nickname.as_str().to_string(),
        message: relayed.message,
        timestamp: relayed.timestamp,
    };
    state
        .message_pusher
        .broadcast(&relayed.targets, &chat.to_json())
        .await;
    Ok(())
}

async fn handle_leave(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    room_code: String,
) -> Result<(), SessionError> {
    let code = RoomCode::new(room_code)?;
    let left = state
        .leave_room_usecase
        .execute(connection_id, Some(&code))
        .await?;

    if let Some(left) = left {
        let event = ServerMessage::PlayerDisconnected {
            nickname: left.nickname.as_str().to_string(),
        };
        state
            .message_pusher
            .broadcast(&left.remaining, &event.to_json())
            .await;
    }
    Ok(())
}

/// トランスポート切断の処理
///
/// 参加中であれば退出と同じ遷移（セッション中断・ルーム破棄判定）を行い、
/// 残りのコネクションに player_disconnected を通知します。
async fn handle_disconnect(state: &Arc<AppState>, connection_id: ConnectionId) {
    match state.leave_room_usecase.execute(connection_id, None).await {
        Ok(Some(left)) => {
            let event = ServerMessage::PlayerDisconnected {
                nickname: left.nickname.as_str().to_string(),
            };
            state
                .message_pusher
                .broadcast(&left.remaining, &event.to_json())
                .await;
            tracing::info!(
                "Broadcasted player_disconnected for '{}' in room '{}'",
                left.nickname,
                left.room_code
            );
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("Disconnect cleanup for '{}' failed: {}", connection_id, e);
        }
    }

    state
        .message_pusher
        .unregister_connection(&connection_id)
        .await;
    tracing::info!("Connection '{}' disconnected and removed", connection_id);
}
