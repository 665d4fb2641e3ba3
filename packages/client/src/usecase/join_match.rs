//! ルーム参加ユースケース
//!
//! 読み取り → 存在確認 → 満員確認 → 席 2 の書き込み、の順に厳密に行います。
//! 読み取りから書き込みまでの間に別の参加者が書き込んだ場合は後勝ちになります。

use std::sync::Arc;

use super::error::SessionError;
use crate::{
    domain::{MatchUpdate, PlayerName, PlayerState, RoomId, Seat},
    session::Session,
    store::{MatchStore, StoreError},
};

pub struct JoinMatchUseCase {
    store: Arc<dyn MatchStore>,
}

impl JoinMatchUseCase {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Joins `room_code` as seat 2.
    pub async fn execute(&self, room_code: &str, name: &str) -> Result<Session, SessionError> {
        let name = PlayerName::new(name)?;
        let room_id = RoomId::parse(room_code)?;

        let record = self
            .store
            .get(&room_id)
            .await?
            .ok_or_else(|| SessionError::RoomNotFound(room_id.to_string()))?;
        if record.is_full() {
            return Err(SessionError::RoomFull(room_id.to_string()));
        }

        self.store
            .update(&room_id, &MatchUpdate::join(PlayerState::new(&name)))
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => SessionError::RoomNotFound(room_id.to_string()),
                other => SessionError::Store(other),
            })?;
        tracing::info!("'{}' joined room '{}'", name, room_id);

        let subscription = self.store.subscribe(&room_id).await?;
        Ok(Session::new(Seat::Two, room_id, subscription))
    }
}
