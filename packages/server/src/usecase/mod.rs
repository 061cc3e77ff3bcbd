//! UseCase 層（Session Coordinator）
//!
//! インバウンドイベントごとに 1 つのユースケースを定義します。
//! GameSession を変更できるのはこの層だけであり、すべての変更は
//! ルーム単位の排他セクション（`SharedRoom` の Mutex）内で実行されます。
//!
//! ## 直列化の規約
//!
//! - 同一ルームに対する状態変更（join / make_move / leave）は
//!   ルームの Mutex により全順序で適用される
//! - ロックは入れ子にしない（ルームのロックとコネクション台帳のロックを
//!   同時に保持しない）
//! - ロック保持中にネットワーク I/O を行わない（ブロードキャストは
//!   unbounded チャンネルへの enqueue のみ）

mod create_room;
mod join_room;
mod leave_room;
mod list_rooms;
mod make_move;
mod relay_chat;

pub use create_room::CreateRoomUseCase;
pub use join_room::{JoinRoomUseCase, RoomJoined, StartedGame};
pub use leave_room::{LeaveRoomUseCase, RoomLeft};
pub use list_rooms::{GetRoomDetailUseCase, ListRoomsUseCase};
pub use make_move::{GameFinished, MakeMoveUseCase, MoveMade};
pub use relay_chat::{ChatRelayed, RelayChatUseCase};
