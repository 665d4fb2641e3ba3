//! チャンネルを使った SnapshotPusher 実装
//!
//! ## 責務
//!
//! - ドキュメントごとの購読者と `UnboundedSender` を管理
//! - スナップショットを JSON（`SnapshotMessage`）にシリアライズして送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、スナップショットの送信に使用します。
//!
//! ドキュメントごとに送信済みの最新バージョンを記録し、それ以下のバージョンは
//! ブロードキャストしません。並行した書き込みの publish 順が前後しても、
//! 購読者が古い状態に戻ることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        DocumentId, DocumentSnapshot, PushError, SnapshotChannel, SnapshotPusher, SubscriberId,
    },
    infrastructure::dto::websocket::SnapshotMessage,
};

/// 1 ドキュメント分の購読者
#[derive(Default)]
struct DocumentSubscribers {
    channels: HashMap<SubscriberId, SnapshotChannel>,
    last_published_version: u64,
}

/// チャンネルを使った SnapshotPusher 実装
#[derive(Default)]
pub struct ChannelSnapshotPusher {
    /// Key: ドキュメント ID
    subscribers: Mutex<HashMap<DocumentId, DocumentSubscribers>>,
}

impl ChannelSnapshotPusher {
    /// 新しい ChannelSnapshotPusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

fn serialize(snapshot: &DocumentSnapshot) -> Result<String, PushError> {
    serde_json::to_string(&SnapshotMessage::from(snapshot))
        .map_err(|e| PushError::Serialization(e.to_string()))
}

#[async_trait]
impl SnapshotPusher for ChannelSnapshotPusher {
    async fn register_subscriber(
        &self,
        document_id: &DocumentId,
        subscriber_id: SubscriberId,
        channel: SnapshotChannel,
    ) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers
            .entry(document_id.clone())
            .or_default()
            .channels
            .insert(subscriber_id, channel);
        tracing::debug!(
            "Subscriber '{}' registered to document '{}'",
            subscriber_id,
            document_id
        );
    }

    async fn unregister_subscriber(
        &self,
        document_id: &DocumentId,
        subscriber_id: &SubscriberId,
    ) -> bool {
        let mut subscribers = self.subscribers.lock().await;
        let removed = subscribers
            .get_mut(document_id)
            .and_then(|entry| entry.channels.remove(subscriber_id))
            .is_some();

        if removed {
            tracing::debug!(
                "Subscriber '{}' unregistered from document '{}'",
                subscriber_id,
                document_id
            );
        }
        removed
    }

    async fn push_to(
        &self,
        subscriber_id: &SubscriberId,
        snapshot: &DocumentSnapshot,
    ) -> Result<(), PushError> {
        let content = serialize(snapshot)?;
        let subscribers = self.subscribers.lock().await;

        let channel = subscribers
            .get(&snapshot.id)
            .and_then(|entry| entry.channels.get(subscriber_id))
            .ok_or_else(|| PushError::SubscriberNotFound(subscriber_id.to_string()))?;

        channel
            .send(content)
            .map_err(|e| PushError::PushFailed(e.to_string()))?;
        tracing::debug!(
            "Pushed snapshot v{} of '{}' to subscriber '{}'",
            snapshot.version(),
            snapshot.id,
            subscriber_id
        );
        Ok(())
    }

    async fn publish(&self, snapshot: &DocumentSnapshot) -> Result<usize, PushError> {
        let content = serialize(snapshot)?;
        let mut subscribers = self.subscribers.lock().await;

        let Some(entry) = subscribers.get_mut(&snapshot.id) else {
            return Ok(0);
        };

        let version = snapshot.version();
        if version <= entry.last_published_version {
            tracing::debug!(
                "Skipping stale snapshot v{} of '{}' (already published v{})",
                version,
                snapshot.id,
                entry.last_published_version
            );
            return Ok(0);
        }
        entry.last_published_version = version;

        // 一部の購読者への送信失敗は許容し、閉じたチャンネルは取り除く
        let mut delivered = 0;
        entry.channels.retain(|subscriber_id, channel| {
            match channel.send(content.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to push snapshot to subscriber '{}', dropping it: {}",
                        subscriber_id,
                        e
                    );
                    false
                }
            }
        });

        tracing::debug!(
            "Published snapshot v{} of '{}' to {} subscriber(s)",
            version,
            snapshot.id,
            delivered
        );
        Ok(delivered)
    }

    async fn subscriber_count(&self, document_id: &DocumentId) -> usize {
        let subscribers = self.subscribers.lock().await;
        subscribers
            .get(document_id)
            .map_or(0, |entry| entry.channels.len())
    }
}
