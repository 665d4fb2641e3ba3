//! UseCase: ドキュメント作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateDocumentUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - IfAbsent 指定時に既存ドキュメントを上書きしないことを保証
//! - 作成後に購読者へスナップショットが届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規作成、サーバー時刻の付与
//! - 異常系：IfAbsent で ID が衝突
//! - エッジケース：Overwrite で ID が衝突

use std::sync::Arc;

use janken_shared::time::Clock;

use crate::domain::{
    CreateMode, Document, DocumentId, DocumentRepository, DocumentSnapshot, FieldWrite,
    RepositoryError, SnapshotPusher, Timestamp,
};

use super::error::CreateDocumentError;

/// ドキュメント作成のユースケース
pub struct CreateDocumentUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn DocumentRepository>,
    /// SnapshotPusher（スナップショット通知の抽象化）
    snapshot_pusher: Arc<dyn SnapshotPusher>,
    /// サーバー時刻
    clock: Arc<dyn Clock>,
}

impl CreateDocumentUseCase {
    /// 新しい CreateDocumentUseCase を作成
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

    /// ドキュメント作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - 作成されたドキュメント
    /// * `Err(CreateDocumentError)` - IfAbsent 指定で ID が使用済み
    pub async fn execute(
        &self,
        id: DocumentId,
        writes: Vec<FieldWrite>,
        mode: CreateMode,
    ) -> Result<Document, CreateDocumentError> {
        let now = Timestamp::new(self.clock.now_millis());

        // 1. Repository にドキュメントを作成
        let document = self
            .repository
            .create(id, writes, mode, now)
            .await
            .map_err(|e| match e {
                RepositoryError::DocumentAlreadyExists(id) => CreateDocumentError::AlreadyExists(id),
                other => CreateDocumentError::Repository(other.to_string()),
            })?;
        tracing::info!("Document '{}' created (v{})", document.id, document.version);

        // 2. 購読者にスナップショットを publish（書き込み自体は成功しているため失敗は警告のみ）
        let snapshot = DocumentSnapshot::exists(document.clone());
        if let Err(e) = self.snapshot_pusher.publish(&snapshot).await {
            tracing::warn!("Failed to publish snapshot of '{}': {}", document.id, e);
        }

        Ok(document)
    }
}
