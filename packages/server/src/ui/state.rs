//! Server state and connection management.

use std::sync::Arc;

use crate::{
    domain::MessagePusher,
    usecase::{
        CreateRoomUseCase, GetRoomDetailUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        ListRoomsUseCase, MakeMoveUseCase, RelayChatUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// ListRoomsUseCase（ルーム一覧取得のユースケース）
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// MakeMoveUseCase（着手のユースケース）
    pub make_move_usecase: Arc<MakeMoveUseCase>,
    /// LeaveRoomUseCase（退出・切断のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// RelayChatUseCase（チャット中継のユースケース）
    pub relay_chat_usecase: Arc<RelayChatUseCase>,
    /// MessagePusher（メッセージ通知の抽象化）
    pub message_pusher: Arc<dyn MessagePusher>,
}
