//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## ロック設計
//!
//! 外側の Mutex はマップ操作（登録・検索・削除）のみを守り、ルーム内容の
//! 変更はルームごとの `SharedRoom`（`Arc<Mutex<Room>>`）が直列化します。
//! 一覧では先に Arc を複製して外側のロックを解放してからルームをロック
//! します。アイドル回収のみ例外で、判定と削除を不可分にするため外側の
//! ロックを保持したままルームを try_lock します（待機はしないため
//! デッドロックは起きません）。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Room, RoomCode, RoomRegistry, RoomSummary, SessionError, SharedRoom, Timestamp,
};

/// インメモリ Room Registry 実装
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    /// ルームコード（正規化済み）→ ルーム
    rooms: Mutex<HashMap<RoomCode, SharedRoom>>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録中の全ルームの Arc を複製して返す（外側のロックは即座に解放）
    async fn snapshot(&self) -> Vec<(RoomCode, SharedRoom)> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .map(|(code, room)| (code.clone(), room.clone()))
            .collect()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn create(&self, room: Room) -> Result<SharedRoom, SessionError> {
        let code = room.code().clone();
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&code) {
            return Err(SessionError::DuplicateCode(code.as_str().to_string()));
        }
        let shared = Arc::new(Mutex::new(room));
        rooms.insert(code, shared.clone());
        Ok(shared)
    }

    async fn find(&self, code: &RoomCode) -> Option<SharedRoom> {
        let rooms = self.rooms.lock().await;
        rooms.get(code).cloned()
    }

    async fn list_public(&self) -> Vec<RoomSummary> {
        let mut snapshot = self.snapshot().await;
        snapshot.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut summaries = Vec::new();
        for (_, shared) in snapshot {
            let room = shared.lock().await;
            if room.visibility().is_public() {
                summaries.push(room.summary());
            }
        }
        summaries
    }

    async fn remove(&self, code: &RoomCode) -> bool {
        let mut rooms = self.rooms.lock().await;
        let removed = rooms.remove(code).is_some();
        if removed {
            tracing::info!("Room '{}' removed from registry", code);
        }
        removed
    }

    async fn count(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }

    async fn remove_idle_since(&self, cutoff: Timestamp) -> usize {
        // アイドル判定と削除は外側のロックを保持したまま行う。判定と削除の
        // 間に find → join が割り込むと、占有者が入ったルームを消してしまう。
        // ルームのロックは try_lock で取得し、使用中のルームは次回に回す
        // （外側のロック保持中にルームのロックを待つことはない）。
        let mut rooms = self.rooms.lock().await;
        let codes: Vec<RoomCode> = rooms.keys().cloned().collect();

        let mut removed = 0;
        for code in codes {
            let Some(shared) = rooms.get(&code).cloned() else {
                continue;
            };
            let Ok(mut room) = shared.try_lock() else {
                continue;
            };
            if room.is_idle_since(cutoff) {
                // Arc を先に取得済みの join に対しては退役フラグで拒否させる
                room.retire();
                rooms.remove(&code);
                tracing::info!("Idle room '{}' reaped", code);
                removed += 1;
            }
        }
        removed
    }
}
