//! UseCase: ドキュメント取得処理

use std::sync::Arc;

use crate::domain::{Document, DocumentId, DocumentRepository};

use super::error::GetDocumentError;

/// ドキュメント取得のユースケース
pub struct GetDocumentUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn DocumentRepository>,
}

impl GetDocumentUseCase {
    /// 新しい GetDocumentUseCase を作成
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// ドキュメントを取得
    pub async fn execute(&self, id: &DocumentId) -> Result<Document, GetDocumentError> {
        self.repository
            .get(id)
            .await
            .ok_or_else(|| GetDocumentError::NotFound(id.as_str().to_string()))
    }
}
