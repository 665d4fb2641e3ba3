//! Live subscription handle.

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use super::error::StoreError;
use crate::domain::{MatchRecord, RoomId};

/// One delivered state of a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Store document version, 0 when the document does not exist
    pub version: u64,
    /// `None` when the room does not exist
    pub record: Option<MatchRecord>,
}

pub(crate) type SnapshotReceiver = mpsc::UnboundedReceiver<Result<Snapshot, StoreError>>;

/// Handle to an open subscription on one room.
///
/// A background worker feeds decoded snapshots into the handle. `next`
/// yields them in order and never goes back to an older version. `close`
/// stops the worker and waits for it to release the store-side subscriber;
/// dropping the handle without closing aborts the worker instead.
pub struct Subscription {
    room_id: RoomId,
    snapshots: SnapshotReceiver,
    cancel: Option<oneshot::Sender<()>>,
    worker: Option<JoinHandle<()>>,
    last_version: Option<u64>,
}

impl Subscription {
    pub(crate) fn new(
        room_id: RoomId,
        snapshots: SnapshotReceiver,
        cancel: Option<oneshot::Sender<()>>,
        worker: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            room_id,
            snapshots,
            cancel,
            worker,
            last_version: None,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Next snapshot newer than the last one returned.
    ///
    /// Returns `None` once the worker has stopped and every pending
    /// delivery has been consumed. Cancel-safe.
    pub async fn next(&mut self) -> Option<Result<Snapshot, StoreError>> {
        loop {
            match self.snapshots.recv().await? {
                Ok(snapshot) if self.is_stale(&snapshot) => {
                    tracing::debug!(
                        "Dropping stale snapshot v{} of room '{}'",
                        snapshot.version,
                        self.room_id
                    );
                }
                Ok(snapshot) => {
                    self.last_version = Some(snapshot.version);
                    return Some(Ok(snapshot));
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }

    fn is_stale(&self, snapshot: &Snapshot) -> bool {
        self.last_version
            .is_some_and(|last| snapshot.version <= last)
    }

    /// Stops the worker and waits until it has unsubscribed.
    pub async fn close(mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                tracing::warn!("Subscription worker for '{}' failed: {}", self.room_id, e);
            }
        }
        self.snapshots.close();
        tracing::debug!("Subscription to room '{}' closed", self.room_id);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchStatus, PlayerName};

    fn snapshot(version: u64, status: MatchStatus) -> Snapshot {
        let mut record = MatchRecord::new_waiting(&PlayerName::new("Ann").unwrap());
        record.status = status;
        Snapshot {
            version,
            record: Some(record),
        }
    }

    #[tokio::test]
    async fn test_next_drops_stale_versions() {
        // テスト項目: 受け取り済みより古いバージョンのスナップショットは捨てられる
        // given (前提条件):
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subscription =
            Subscription::new(RoomId::parse("AB12").unwrap(), rx, None, None);
        tx.send(Ok(snapshot(2, MatchStatus::Playing))).unwrap();
        tx.send(Ok(snapshot(1, MatchStatus::Waiting))).unwrap();
        tx.send(Ok(snapshot(2, MatchStatus::Playing))).unwrap();
        tx.send(Ok(snapshot(3, MatchStatus::Result))).unwrap();
        drop(tx);

        // when (操作):
        let mut versions = Vec::new();
        while let Some(item) = subscription.next().await {
            versions.push(item.unwrap().version);
        }

        // then (期待する結果):
        assert_eq!(versions, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_next_passes_errors_through() {
        // テスト項目: ワーカーからのエラーはそのまま呼び出し側に届く
        // given (前提条件):
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subscription =
            Subscription::new(RoomId::parse("AB12").unwrap(), rx, None, None);
        tx.send(Err(StoreError::SubscriptionClosed)).unwrap();

        // when (操作):
        let item = subscription.next().await;

        // then (期待する結果):
        assert_eq!(item, Some(Err(StoreError::SubscriptionClosed)));
    }

    #[tokio::test]
    async fn test_close_signals_worker_and_waits() {
        // テスト項目: close はワーカーに停止を伝え、その終了を待つ
        // given (前提条件):
        let (_tx, rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        let worker = tokio::spawn(async move {
            let _ = cancel_rx.await;
            let _ = done_tx.send(());
        });
        let subscription = Subscription::new(
            RoomId::parse("AB12").unwrap(),
            rx,
            Some(cancel_tx),
            Some(worker),
        );

        // when (操作):
        subscription.close().await;

        // then (期待する結果):
        assert_eq!(done_rx.await, Ok(()));
    }
}
