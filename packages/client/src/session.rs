//! Per-client session context.
//!
//! A `Session` is what a successful create or join hands back: the local
//! seat, the room and the one live subscription to it. Every later
//! operation takes the session explicitly.

use crate::{
    domain::{RoomId, Seat},
    store::{Snapshot, StoreError, Subscription},
};

pub struct Session {
    seat: Seat,
    room_id: RoomId,
    subscription: Option<Subscription>,
}

impl Session {
    pub(crate) fn new(seat: Seat, room_id: RoomId, subscription: Subscription) -> Self {
        Self {
            seat,
            room_id,
            subscription: Some(subscription),
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Next snapshot of the room, `None` once the subscription is closed.
    pub async fn next_snapshot(&mut self) -> Option<Result<Snapshot, StoreError>> {
        match self.subscription.as_mut() {
            Some(subscription) => subscription.next().await,
            None => None,
        }
    }

    /// Closes the subscription. Later calls do nothing.
    pub async fn close(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.close().await;
            tracing::info!("Left room '{}' as {}", self.room_id, self.seat);
        }
    }
}
