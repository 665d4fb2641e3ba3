//! 手の送信ユースケース
//!
//! 自分の席の `choice` フィールドだけを書き込みます。同じ手の再送信は同じ書き込みになります。

use std::sync::Arc;

use super::{error::SessionError, session_write_error};
use crate::{
    domain::{Choice, MatchUpdate},
    session::Session,
    store::MatchStore,
};

pub struct SubmitChoiceUseCase {
    store: Arc<dyn MatchStore>,
}

impl SubmitChoiceUseCase {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, session: &Session, choice: Choice) -> Result<(), SessionError> {
        self.store
            .update(
                session.room_id(),
                &MatchUpdate::submit_choice(session.seat(), choice),
            )
            .await
            .map_err(|e| session_write_error(session.room_id(), e))?;
        tracing::debug!(
            "{} chose {} in room '{}'",
            session.seat(),
            choice,
            session.room_id()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Seat,
        store::{MockMatchStore, StoreError},
        usecase::test_support::session,
    };

    #[tokio::test]
    async fn test_submit_choice_writes_own_field() {
        // テスト項目: 手の送信は自分の席の choice だけを書き込む
        // given (前提条件):
        let mut store = MockMatchStore::new();
        store
            .expect_update()
            .withf(|room_id, update| {
                room_id.as_str() == "AB12"
                    && *update == MatchUpdate::submit_choice(Seat::Two, Choice::Scissors)
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = SubmitChoiceUseCase::new(Arc::new(store));
        let session = session(Seat::Two, "AB12");

        // when (操作):
        let result = usecase.execute(&session, Choice::Scissors).await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_submit_to_deleted_room_reports_room_gone() {
        // テスト項目: ルームが消えていた場合は RoomGone になる
        // given (前提条件):
        let mut store = MockMatchStore::new();
        store
            .expect_update()
            .returning(|room_id, _| Err(StoreError::NotFound(room_id.to_string())));
        let usecase = SubmitChoiceUseCase::new(Arc::new(store));
        let session = session(Seat::One, "AB12");

        // when (操作):
        let result = usecase.execute(&session, Choice::Rock).await;

        // then (期待する結果):
        assert_eq!(result, Err(SessionError::RoomGone("AB12".to_string())));
    }
}
