//! UseCase: ルーム一覧・詳細取得
//!
//! 一覧サービス（HTTP）向けの読み取り専用ユースケース。サマリは
//! スナップショットであり、リアルタイム経路のロックを長く保持しません。

use std::sync::Arc;

use crate::domain::{RoomCode, RoomDetail, RoomRegistry, RoomSummary, SessionError};

/// public ルーム一覧取得のユースケース
pub struct ListRoomsUseCase {
    /// Registry（ルーム保管の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl ListRoomsUseCase {
    /// 新しい ListRoomsUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// public ルームのサマリ一覧を取得（コード昇順）
    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.registry.list_public().await
    }
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Registry（ルーム保管の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// コードでルーム詳細を取得
    ///
    /// private なルームもコードを知っていれば参照できます（コードが
    /// 招待状の役割を果たすため）。
    pub async fn execute(&self, code: String) -> Result<RoomDetail, SessionError> {
        let code = RoomCode::new(code)?;
        let shared = self
            .registry
            .find(&code)
            .await
            .ok_or(SessionError::RoomNotFound)?;

        let room = shared.lock().await;
        Ok(room.detail())
    }
}
