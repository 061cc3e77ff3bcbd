//! ドメイン層の値オブジェクト（Value Object）
//!
//! プリミティブ型をそのまま引き回さず、検証済みの値として型で表現します。

use crate::domain::error::SessionError;

/// ルームコード
///
/// 人間が入力できる短い識別子。大文字に正規化され、正規化後の値が
/// ルームの主キーとなります（大文字小文字を区別しない）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomCode(String);

impl RoomCode {
    /// 最小文字数
    pub const MIN_LEN: usize = 4;
    /// 最大文字数
    pub const MAX_LEN: usize = 10;

    /// 入力文字列からルームコードを作成（大文字に正規化）
    ///
    /// 英数字 4〜10 文字のみ受け付けます。
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionError> {
        let canonical = raw.into().trim().to_ascii_uppercase();
        let len = canonical.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len)
            || !canonical.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(SessionError::InvalidRoomCode(canonical));
        }
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// ニックネーム
///
/// 前後の空白を除去した 1〜32 文字の表示名。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    /// 最大文字数
    pub const MAX_LEN: usize = 32;

    /// 入力文字列からニックネームを作成
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() || trimmed.chars().count() > Self::MAX_LEN {
            return Err(SessionError::InvalidNickname(trimmed));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Nickname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// タイムスタンプ（JST ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
