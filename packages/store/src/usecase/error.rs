//! UseCase 層のエラー定義

use thiserror::Error;

/// ドキュメント作成のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CreateDocumentError {
    #[error("Document '{0}' already exists")]
    AlreadyExists(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

/// ドキュメント取得のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GetDocumentError {
    #[error("Document '{0}' not found")]
    NotFound(String),
}

/// ドキュメント更新のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpdateDocumentError {
    #[error("Document '{0}' not found")]
    NotFound(String),

    #[error("Update contains no fields")]
    EmptyUpdate,

    #[error("Repository error: {0}")]
    Repository(String),
}
