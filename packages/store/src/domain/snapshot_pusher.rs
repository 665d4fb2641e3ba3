//! SnapshotPusher trait 定義
//!
//! ドキュメントの購読者へスナップショットを届けるためのインターフェース。
//! 送信手段（WebSocket、プロセス内チャンネルなど）は Infrastructure 層が決めます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{DocumentId, DocumentSnapshot, PushError, SubscriberId};

/// 購読者へシリアライズ済みのスナップショットを送るチャンネル
pub type SnapshotChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait SnapshotPusher: Send + Sync {
    /// 購読者を登録
    async fn register_subscriber(
        &self,
        document_id: &DocumentId,
        subscriber_id: SubscriberId,
        channel: SnapshotChannel,
    );

    /// 購読者の登録を解除（登録されていた場合は true）
    async fn unregister_subscriber(
        &self,
        document_id: &DocumentId,
        subscriber_id: &SubscriberId,
    ) -> bool;

    /// 特定の購読者にスナップショットを送信
    async fn push_to(
        &self,
        subscriber_id: &SubscriberId,
        snapshot: &DocumentSnapshot,
    ) -> Result<(), PushError>;

    /// ドキュメントの全購読者にスナップショットを送信し、送信できた数を返す
    ///
    /// すでに送信済みのバージョン以下のスナップショットは送らない。
    async fn publish(&self, snapshot: &DocumentSnapshot) -> Result<usize, PushError>;

    /// ドキュメントの購読者数を取得
    async fn subscriber_count(&self, document_id: &DocumentId) -> usize;
}
