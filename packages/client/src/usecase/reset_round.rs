//! ラウンドリセットユースケース
//!
//! 結果表示から一定時間後に、両者の手を消して次のラウンドを始めます。
//! 先にタイマーが切れた側の書き込みが効き、後からの同じ書き込みは実質的に何も変えません。

use std::sync::Arc;

use super::{error::SessionError, session_write_error};
use crate::{domain::MatchUpdate, session::Session, store::MatchStore};

pub struct ResetRoundUseCase {
    store: Arc<dyn MatchStore>,
}

impl ResetRoundUseCase {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, session: &Session) -> Result<(), SessionError> {
        self.store
            .update(session.room_id(), &MatchUpdate::reset_round())
            .await
            .map_err(|e| session_write_error(session.room_id(), e))?;
        tracing::debug!("Round in room '{}' reset", session.room_id());
        Ok(())
    }
}
