//! InMemory Document Repository 実装
//!
//! ドメイン層が定義する DocumentRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 1 つの Mutex で全ドキュメントを保護しているため、1 回の書き込みに含まれる
//! フィールドはまとめて適用され、他の書き込みと混ざることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    CreateMode, Document, DocumentId, DocumentRepository, FieldWrite, RepositoryError, Timestamp,
};

/// インメモリ Document Repository 実装
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<HashMap<DocumentId, Document>>,
}

impl InMemoryDocumentRepository {
    /// 新しい InMemoryDocumentRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn get(&self, id: &DocumentId) -> Option<Document> {
        let documents = self.documents.lock().await;
        documents.get(id).cloned()
    }

    async fn create(
        &self,
        id: DocumentId,
        writes: Vec<FieldWrite>,
        mode: CreateMode,
        now: Timestamp,
    ) -> Result<Document, RepositoryError> {
        let mut documents = self.documents.lock().await;

        match (documents.get_mut(&id), mode) {
            (Some(_), CreateMode::IfAbsent) => Err(RepositoryError::DocumentAlreadyExists(
                id.into_string(),
            )),
            (Some(existing), CreateMode::Overwrite) => {
                tracing::debug!("Overwriting existing document '{}'", id);
                existing.overwrite(&writes, now);
                Ok(existing.clone())
            }
            (None, _) => {
                let document = Document::create(id.clone(), &writes, now);
                documents.insert(id, document.clone());
                Ok(document)
            }
        }
    }

    async fn update(
        &self,
        id: &DocumentId,
        writes: Vec<FieldWrite>,
        now: Timestamp,
    ) -> Result<Document, RepositoryError> {
        let mut documents = self.documents.lock().await;
        let document = documents
            .get_mut(id)
            .ok_or_else(|| RepositoryError::DocumentNotFound(id.as_str().to_string()))?;

        document.apply(&writes, now);
        Ok(document.clone())
    }

    async fn count(&self) -> usize {
        let documents = self.documents.lock().await;
        documents.len()
    }
}
