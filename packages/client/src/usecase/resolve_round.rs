//! 勝敗確定ユースケース
//!
//! 両者の手を観測したクライアントが `{status: result, winner}` を書き込みます。
//! 両方のクライアントが同じ値を書くため、書き込みの順序に関係なく同じ状態に収束します。

use std::sync::Arc;

use super::{error::SessionError, session_write_error};
use crate::{
    domain::{MatchUpdate, RoundOutcome},
    session::Session,
    store::MatchStore,
};

pub struct ResolveRoundUseCase {
    store: Arc<dyn MatchStore>,
}

impl ResolveRoundUseCase {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        session: &Session,
        outcome: RoundOutcome,
    ) -> Result<(), SessionError> {
        self.store
            .update(session.room_id(), &MatchUpdate::resolve(outcome))
            .await
            .map_err(|e| session_write_error(session.room_id(), e))?;
        tracing::debug!("Round in room '{}' resolved: {:?}", session.room_id(), outcome);
        Ok(())
    }
}
