//! Room Registry の実装
//!
//! - `inmemory`: HashMap をインメモリ DB として使用する実装

pub mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
