//! ルーム（対局の入れ物）
//!
//! ルームは最大 2 人の参加者をペアリングする名前付き・コード付きの
//! コンテナで、ライブな GameSession を 1 つ所有します。

use crate::domain::{
    connection::ConnectionId,
    game::{GameSession, GameStatus},
    values::{Nickname, RoomCode, Timestamp},
};

/// ルームの公開設定
///
/// public なルームは一覧に表示され、private なルームはコードを知っている
/// 参加者のみが join できます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// ルームの占有者（接続中の参加者）
#[derive(Debug, Clone)]
pub struct Occupant {
    pub connection_id: ConnectionId,
    pub nickname: Nickname,
}

/// ルーム一覧用のサマリ（スナップショット）
#[derive(Debug, Clone)]
pub struct RoomSummary {
    pub code: RoomCode,
    pub name: String,
    pub visibility: Visibility,
    pub occupancy: usize,
    pub status: GameStatus,
    pub created_at: Timestamp,
}

/// ルーム詳細（サマリ + 参加者一覧）
#[derive(Debug, Clone)]
pub struct RoomDetail {
    pub summary: RoomSummary,
    pub creator: Nickname,
    pub occupants: Vec<Nickname>,
}

/// ルーム
///
/// 変更操作はルーム単位の排他セクション（`Arc<Mutex<Room>>`）内でのみ
/// 行われます。ルーム間の共有はないため、ルームごとに独立して並行処理
/// できます。
#[derive(Debug)]
pub struct Room {
    code: RoomCode,
    name: String,
    visibility: Visibility,
    creator: Nickname,
    occupants: Vec<Occupant>,
    session: GameSession,
    created_at: Timestamp,
    last_activity: Timestamp,
    retired: bool,
}

impl Room {
    /// ルームの定員（固定）
    pub const CAPACITY: usize = 2;

    /// 新しいルームを作成（waiting の空セッション付き）
    pub fn new(
        code: RoomCode,
        name: String,
        visibility: Visibility,
        creator: Nickname,
        now: Timestamp,
    ) -> Self {
        Self {
            code,
            name,
            visibility,
            creator,
            occupants: Vec::with_capacity(Self::CAPACITY),
            session: GameSession::new(),
            created_at: now,
            last_activity: now,
            retired: false,
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn creator(&self) -> &Nickname {
        &self.creator
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn occupancy(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_full(&self) -> bool {
        self.occupants.len() >= Self::CAPACITY
    }

    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }

    /// 最終活動時刻を更新
    pub fn touch(&mut self, now: Timestamp) {
        self.last_activity = now;
    }

    /// 占有者を追加
    pub fn add_occupant(&mut self, occupant: Occupant) {
        debug_assert!(self.occupants.len() < Self::CAPACITY);
        self.occupants.push(occupant);
    }

    /// 占有者を削除して返す（存在しない場合は None）
    pub fn remove_occupant(&mut self, connection_id: &ConnectionId) -> Option<Occupant> {
        let index = self
            .occupants
            .iter()
            .position(|o| &o.connection_id == connection_id)?;
        Some(self.occupants.remove(index))
    }

    /// ルーム内の全コネクション ID
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.occupants.iter().map(|o| o.connection_id).collect()
    }

    /// 指定コネクション以外の全コネクション ID（ブロードキャスト対象）
    pub fn connection_ids_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.occupants
            .iter()
            .filter(|o| &o.connection_id != exclude)
            .map(|o| o.connection_id)
            .collect()
    }

    /// セッションが終了し、かつ占有者がいなくなったか
    ///
    /// この条件を満たしたルームは Registry から削除されます。
    pub fn is_disposable(&self) -> bool {
        self.occupants.is_empty() && self.session.status() == GameStatus::Finished
    }

    /// アイドル回収の対象か（占有者ゼロのまま一定時間経過）
    pub fn is_idle_since(&self, cutoff: Timestamp) -> bool {
        self.occupants.is_empty() && self.last_activity < cutoff
    }

    /// Registry から削除される直前に呼ばれ、ルームを退役させる
    ///
    /// Registry の検索より前に `SharedRoom` の Arc を取得していた参加処理は
    /// ロック取得後にこのフラグを確認し、退役済みルームへの join を拒否します。
    pub fn retire(&mut self) {
        self.retired = true;
    }

    /// Registry から削除済み（回収済み）かどうか
    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// 一覧用サマリのスナップショットを作成
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            code: self.code.clone(),
            name: self.name.clone(),
            visibility: self.visibility,
            occupancy: self.occupants.len(),
            status: self.session.status(),
            created_at: self.created_at,
        }
    }

    /// 詳細のスナップショットを作成
    pub fn detail(&self) -> RoomDetail {
        RoomDetail {
            summary: self.summary(),
            creator: self.creator.clone(),
            occupants: self.occupants.iter().map(|o| o.nickname.clone()).collect(),
        }
    }
}
