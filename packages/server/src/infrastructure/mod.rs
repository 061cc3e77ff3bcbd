//! Infrastructure 層
//!
//! ドメイン層が定義するインターフェース（Registry, MessagePusher,
//! StatsRecorder）の具体的な実装と、プロトコル別の DTO を提供します。

pub mod dto;
pub mod message_pusher;
pub mod registry;
pub mod stats;
