//! 値オブジェクト
//!
//! 生成時にバリデーションを行い、不正な値がドメイン層に入り込まないようにします。

use std::fmt;

use serde_json::Value;
use uuid::Uuid;

use super::error::ValueObjectError;

/// ドキュメント ID の最大長
pub const MAX_DOCUMENT_ID_LENGTH: usize = 64;

/// ドキュメント ID（大文字小文字を区別する）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// 新しい DocumentId を作成
    ///
    /// 1〜64 文字の `[A-Za-z0-9_-]` のみ許可します。
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let valid = !value.is_empty()
            && value.len() <= MAX_DOCUMENT_ID_LENGTH
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if valid {
            Ok(Self(value))
        } else {
            Err(ValueObjectError::InvalidDocumentId(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ドキュメント内のフィールドを指すパス（例: `player1.choice`）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// ドット区切りの文字列からパスを生成
    pub fn parse(path: &str) -> Result<Self, ValueObjectError> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ValueObjectError::InvalidFieldPath(path.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// 書き込む値
///
/// `ServerTimestamp` は書き込み時点のストアの時刻（エポックミリ秒）に置き換えられます。
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Value(Value),
    ServerTimestamp,
}

/// 1 フィールド分の書き込み
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWrite {
    pub path: FieldPath,
    pub value: FieldValue,
}

impl FieldWrite {
    pub fn value(path: FieldPath, value: Value) -> Self {
        Self {
            path,
            value: FieldValue::Value(value),
        }
    }

    pub fn server_timestamp(path: FieldPath) -> Self {
        Self {
            path,
            value: FieldValue::ServerTimestamp,
        }
    }
}

/// タイムスタンプ（エポックミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// スナップショット購読者の ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
