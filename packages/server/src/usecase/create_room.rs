//! UseCase: ルーム作成
//!
//! 一覧サービス（HTTP）から呼ばれる作成処理。コードの検証と重複チェックを
//! 行い、waiting の空セッション付きでルームを登録します。

use std::sync::Arc;

use marubatsu_shared::time::Clock;

use crate::domain::{
    Nickname, Room, RoomCode, RoomRegistry, RoomSummary, SessionError, Timestamp, Visibility,
};

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Registry（ルーム保管の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（時刻取得の抽象化）
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    /// 登録可能なルーム数の上限
    ///
    /// 上限到達はサーバ側の資源枯渇であり、RoomFull として呼び出し元に
    /// 返します（プロセスは落とさない）。
    pub const MAX_ROOMS: usize = 10_000;

    /// 新しい CreateRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// ルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `name` - 表示名（作成者が指定）
    /// * `code` - ルームコード（大文字に正規化される）
    /// * `visibility` - 公開設定
    /// * `creator` - 作成者のニックネーム
    pub async fn execute(
        &self,
        name: String,
        code: String,
        visibility: Visibility,
        creator: String,
    ) -> Result<RoomSummary, SessionError> {
        let code = RoomCode::new(code)?;
        let creator = Nickname::new(creator)?;

        if self.registry.count().await >= Self::MAX_ROOMS {
            tracing::warn!("Room storage exhausted, rejecting creation of '{}'", code);
            return Err(SessionError::RoomFull);
        }

        let now = Timestamp::new(self.clock.now_jst_millis());
        let room = Room::new(code.clone(), name, visibility, creator, now);
        let shared = self.registry.create(room).await?;

        let summary = shared.lock().await.summary();
        tracing::info!("Room '{}' created", code);
        Ok(summary)
    }
}
