//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ドキュメント ID の形式が不正
    #[error("Invalid document id '{0}': expected 1-64 characters of [A-Za-z0-9_-]")]
    InvalidDocumentId(String),

    /// フィールドパスの形式が不正
    #[error("Invalid field path '{0}': expected dot-separated non-empty segments")]
    InvalidFieldPath(String),
}

/// Repository 操作のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Document '{0}' not found")]
    DocumentNotFound(String),

    #[error("Document '{0}' already exists")]
    DocumentAlreadyExists(String),
}

/// スナップショット送信時のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PushError {
    #[error("Subscriber '{0}' not found")]
    SubscriberNotFound(String),

    #[error("Failed to push snapshot: {0}")]
    PushFailed(String),

    #[error("Failed to serialize snapshot: {0}")]
    Serialization(String),
}
