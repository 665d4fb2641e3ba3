//! Access to the match store.
//!
//! `MatchStore` is the seam between the round protocol and the document
//! store: the use cases only see match records and typed updates. Two
//! implementations are provided:
//!
//! - `RemoteMatchStore`: HTTP + WebSocket against a running `janken-store`
//! - `EmbeddedMatchStore`: the store's use cases in the same process

mod codec;
mod embedded;
mod error;
mod remote;
mod subscription;

use async_trait::async_trait;

use crate::domain::{MatchRecord, MatchUpdate, RoomId};

pub use embedded::EmbeddedMatchStore;
pub use error::StoreError;
pub use remote::RemoteMatchStore;
pub use subscription::{Snapshot, Subscription};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Writes a new record; fails with `AlreadyExists` if the room id is taken.
    async fn create(&self, room_id: &RoomId, record: &MatchRecord) -> Result<(), StoreError>;

    /// Point read; `None` when the room does not exist.
    async fn get(&self, room_id: &RoomId) -> Result<Option<MatchRecord>, StoreError>;

    /// Applies a partial write and stamps `lastUpdated`; fails with
    /// `NotFound` if the room does not exist.
    async fn update(&self, room_id: &RoomId, update: &MatchUpdate) -> Result<(), StoreError>;

    /// Opens a live subscription. The current state is delivered first.
    async fn subscribe(&self, room_id: &RoomId) -> Result<Subscription, StoreError>;
}
