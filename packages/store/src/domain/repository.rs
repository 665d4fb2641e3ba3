//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{Document, DocumentId, FieldWrite, RepositoryError, Timestamp};

/// ドキュメント作成時の挙動
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMode {
    /// 既存のドキュメントがあれば丸ごと上書きする
    Overwrite,
    /// 既存のドキュメントがあれば `DocumentAlreadyExists` で失敗する
    IfAbsent,
}

/// Document Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
/// 1 回の呼び出しに含まれる書き込みは、ドキュメント単位でアトミックに適用されること。
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// ドキュメントを取得
    async fn get(&self, id: &DocumentId) -> Option<Document>;

    /// ドキュメントを作成
    async fn create(
        &self,
        id: DocumentId,
        writes: Vec<FieldWrite>,
        mode: CreateMode,
        now: Timestamp,
    ) -> Result<Document, RepositoryError>;

    /// 既存のドキュメントの一部のフィールドを更新
    async fn update(
        &self,
        id: &DocumentId,
        writes: Vec<FieldWrite>,
        now: Timestamp,
    ) -> Result<Document, RepositoryError>;

    /// 保存されているドキュメント数を取得
    async fn count(&self) -> usize;
}
