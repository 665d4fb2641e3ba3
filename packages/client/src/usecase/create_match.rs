//! ルーム作成ユースケース
//!
//! 名前を検証し、新しいルームコードで待機中のレコードを作成して購読を開始します。
//! コードが既存のルームと衝突した場合は上書きせずにエラーを返します。

use std::sync::Arc;

use super::error::SessionError;
use crate::{
    domain::{MatchRecord, PlayerName, RoomId, RoomIdFactory, Seat},
    session::Session,
    store::{MatchStore, StoreError},
};

pub struct CreateMatchUseCase {
    store: Arc<dyn MatchStore>,
}

impl CreateMatchUseCase {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Creates a room under a freshly generated code.
    pub async fn execute(&self, name: &str) -> Result<Session, SessionError> {
        self.execute_with_room_id(RoomIdFactory::generate(), name)
            .await
    }

    /// Creates a room under the given code. Takes seat 1.
    pub async fn execute_with_room_id(
        &self,
        room_id: RoomId,
        name: &str,
    ) -> Result<Session, SessionError> {
        let name = PlayerName::new(name)?;
        let record = MatchRecord::new_waiting(&name);

        self.store
            .create(&room_id, &record)
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists(_) => SessionError::RoomIdTaken(room_id.to_string()),
                other => SessionError::Store(other),
            })?;
        tracing::info!("Room '{}' created by '{}'", room_id, name);

        let subscription = self.store.subscribe(&room_id).await?;
        Ok(Session::new(Seat::One, room_id, subscription))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MatchStatus, ValidationError},
        store::MockMatchStore,
        usecase::test_support::idle_subscription,
    };

    #[tokio::test]
    async fn test_create_match_takes_seat_one() {
        // テスト項目: ルームを作成すると待機中のレコードが書かれ、席 1 のセッションが返る
        // given (前提条件):
        let mut store = MockMatchStore::new();
        store
            .expect_create()
            .withf(|room_id, record| {
                room_id.as_str() == "AB12"
                    && record.status == MatchStatus::Waiting
                    && record.seat1.as_ref().is_some_and(|p| p.name == "Ann")
                    && record.seat2.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_subscribe()
            .times(1)
            .returning(|room_id| Ok(idle_subscription(room_id)));
        let usecase = CreateMatchUseCase::new(Arc::new(store));

        // when (操作):
        let session = usecase
            .execute_with_room_id(RoomId::parse("AB12").unwrap(), "  Ann ")
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(session.seat(), Seat::One);
        assert_eq!(session.room_id().as_str(), "AB12");
        assert!(session.is_subscribed());
    }

    #[tokio::test]
    async fn test_empty_name_writes_nothing() {
        // テスト項目: 空の名前ではストアに一切アクセスしない
        // given (前提条件):
        let mut store = MockMatchStore::new();
        store.expect_create().never();
        store.expect_subscribe().never();
        let usecase = CreateMatchUseCase::new(Arc::new(store));

        // when (操作):
        let result = usecase.execute("   ").await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(SessionError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn test_room_id_collision_is_reported() {
        // テスト項目: ルームコードが衝突した場合は上書きせず、購読もしない
        // given (前提条件):
        let mut store = MockMatchStore::new();
        store
            .expect_create()
            .returning(|room_id, _| Err(StoreError::AlreadyExists(room_id.to_string())));
        store.expect_subscribe().never();
        let usecase = CreateMatchUseCase::new(Arc::new(store));

        // when (操作):
        let result = usecase
            .execute_with_room_id(RoomId::parse("AB12").unwrap(), "Ann")
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(SessionError::RoomIdTaken(id)) if id == "AB12"));
    }
}
