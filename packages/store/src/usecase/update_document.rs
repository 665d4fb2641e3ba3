//! UseCase: ドキュメント部分更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateDocumentUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 指定したフィールドだけが書き換わり、他のフィールドが残ることを保証
//! - 同じ値を 2 回書いても内容が変わらないこと（冪等な収束書き込み）を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：部分更新と publish
//! - 異常系：存在しないドキュメント、空の更新

use std::sync::Arc;

use janken_shared::time::Clock;

use crate::domain::{
    Document, DocumentId, DocumentRepository, DocumentSnapshot, FieldWrite, RepositoryError,
    SnapshotPusher, Timestamp,
};

use super::error::UpdateDocumentError;

/// ドキュメント部分更新のユースケース
pub struct UpdateDocumentUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn DocumentRepository>,
    /// SnapshotPusher（スナップショット通知の抽象化）
    snapshot_pusher: Arc<dyn SnapshotPusher>,
    /// サーバー時刻
    clock: Arc<dyn Clock>,
}

impl UpdateDocumentUseCase {
    /// 新しい UpdateDocumentUseCase を作成
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        snapshot_pusher: Arc<dyn SnapshotPusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            snapshot_pusher,
            clock,
        }
    }

    /// 部分更新を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - 更新後のドキュメント
    /// * `Err(UpdateDocumentError)` - ドキュメントが存在しない、または更新が空
    pub async fn execute(
        &self,
        id: &DocumentId,
        writes: Vec<FieldWrite>,
    ) -> Result<Document, UpdateDocumentError> {
        if writes.is_empty() {
            return Err(UpdateDocumentError::EmptyUpdate);
        }
        let now = Timestamp::new(self.clock.now_millis());

        // 1. Repository のドキュメントを更新
        let document = self
            .repository
            .update(id, writes, now)
            .await
            .map_err(|e| match e {
                RepositoryError::DocumentNotFound(id) => UpdateDocumentError::NotFound(id),
                other => UpdateDocumentError::Repository(other.to_string()),
            })?;
        tracing::debug!("Document '{}' updated (v{})", document.id, document.version);

        // 2. 購読者にスナップショットを publish
        let snapshot = DocumentSnapshot::exists(document.clone());
        if let Err(e) = self.snapshot_pusher.publish(&snapshot).await {
            tracing::warn!("Failed to publish snapshot of '{}': {}", document.id, e);
        }

        Ok(document)
    }
}
