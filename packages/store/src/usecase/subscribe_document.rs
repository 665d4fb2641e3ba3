//! UseCase: ドキュメント購読処理
//!
//! 購読を登録した直後に、その時点のスナップショット（存在しない場合も含む）を
//! 購読者に送ります。以降の変更は書き込み系ユースケースの publish で届きます。

use std::sync::Arc;

use crate::domain::{
    DocumentId, DocumentRepository, DocumentSnapshot, SnapshotChannel, SnapshotPusher,
    SubscriberId,
};

/// ドキュメント購読のユースケース
pub struct SubscribeDocumentUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn DocumentRepository>,
    /// SnapshotPusher（スナップショット通知の抽象化）
    snapshot_pusher: Arc<dyn SnapshotPusher>,
}

impl SubscribeDocumentUseCase {
    /// 新しい SubscribeDocumentUseCase を作成
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        snapshot_pusher: Arc<dyn SnapshotPusher>,
    ) -> Self {
        Self {
            repository,
            snapshot_pusher,
        }
    }

    /// 購読を開始し、購読者 ID を返す
    pub async fn execute(&self, id: &DocumentId, channel: SnapshotChannel) -> SubscriberId {
        let subscriber_id = SubscriberId::generate();

        // 1. 登録してから現在の状態を読むことで、間の書き込みを取りこぼさない
        self.snapshot_pusher
            .register_subscriber(id, subscriber_id, channel)
            .await;

        // 2. 現在のスナップショットを送信
        let snapshot = match self.repository.get(id).await {
            Some(document) => DocumentSnapshot::exists(document),
            None => DocumentSnapshot::missing(id.clone()),
        };
        if let Err(e) = self.snapshot_pusher.push_to(&subscriber_id, &snapshot).await {
            tracing::warn!(
                "Failed to push initial snapshot of '{}' to '{}': {}",
                id,
                subscriber_id,
                e
            );
        }

        tracing::info!("Subscriber '{}' subscribed to '{}'", subscriber_id, id);
        subscriber_id
    }

    /// 購読を終了
    pub async fn unsubscribe(&self, id: &DocumentId, subscriber_id: &SubscriberId) {
        if self
            .snapshot_pusher
            .unregister_subscriber(id, subscriber_id)
            .await
        {
            tracing::info!("Subscriber '{}' unsubscribed from '{}'", subscriber_id, id);
        }
    }
}
