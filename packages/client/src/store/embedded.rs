//! In-process match store backed by the store's own use cases.

use std::sync::Arc;

use async_trait::async_trait;
use janken_shared::time::Clock;
use janken_store::usecase::{
    CreateDocumentError, GetDocumentError, StoreUseCases, UpdateDocumentError,
};
use tokio::sync::{mpsc, oneshot};

use super::{
    MatchStore, codec,
    error::StoreError,
    subscription::Subscription,
};
use crate::domain::{MatchRecord, MatchUpdate, RoomId};

/// Match store living in the current process.
///
/// Behaves like the remote store, including version-ordered snapshot
/// delivery, without a network hop. Clones share the same documents.
#[derive(Clone)]
pub struct EmbeddedMatchStore {
    usecases: StoreUseCases,
}

impl EmbeddedMatchStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::from_usecases(StoreUseCases::in_memory(clock))
    }

    pub fn from_usecases(usecases: StoreUseCases) -> Self {
        Self { usecases }
    }
}

fn rejected(status: u16, message: impl ToString) -> StoreError {
    StoreError::Rejected {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl MatchStore for EmbeddedMatchStore {
    async fn create(&self, room_id: &RoomId, record: &MatchRecord) -> Result<(), StoreError> {
        let document_id = codec::document_id(room_id)?;
        let (writes, mode) = codec::create_request(record)?
            .into_domain()
            .map_err(|e| rejected(400, e))?;

        match self
            .usecases
            .create_document
            .execute(document_id, writes, mode)
            .await
        {
            Ok(_) => Ok(()),
            Err(CreateDocumentError::AlreadyExists(id)) => Err(StoreError::AlreadyExists(id)),
            Err(e @ CreateDocumentError::Repository(_)) => Err(rejected(500, e)),
        }
    }

    async fn get(&self, room_id: &RoomId) -> Result<Option<MatchRecord>, StoreError> {
        let document_id = codec::document_id(room_id)?;
        match self.usecases.get_document.execute(&document_id).await {
            Ok(document) => codec::decode_record(document.fields).map(Some),
            Err(GetDocumentError::NotFound(_)) => Ok(None),
        }
    }

    async fn update(&self, room_id: &RoomId, update: &MatchUpdate) -> Result<(), StoreError> {
        let document_id = codec::document_id(room_id)?;
        let writes = codec::update_request(update)?
            .into_domain()
            .map_err(|e| rejected(400, e))?;

        match self
            .usecases
            .update_document
            .execute(&document_id, writes)
            .await
        {
            Ok(_) => Ok(()),
            Err(UpdateDocumentError::NotFound(id)) => Err(StoreError::NotFound(id)),
            Err(e @ UpdateDocumentError::EmptyUpdate) => Err(rejected(400, e)),
            Err(e @ UpdateDocumentError::Repository(_)) => Err(rejected(500, e)),
        }
    }

    async fn subscribe(&self, room_id: &RoomId) -> Result<Subscription, StoreError> {
        let document_id = codec::document_id(room_id)?;
        let (channel, mut messages) = mpsc::unbounded_channel();
        let subscriber_id = self
            .usecases
            .subscribe_document
            .execute(&document_id, channel)
            .await;

        let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        let subscribe_document = self.usecases.subscribe_document.clone();

        let worker = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut cancel_rx => break,
                    message = messages.recv() => match message {
                        Some(text) => {
                            if snapshot_tx.send(codec::decode_snapshot(&text)).is_err() {
                                break;
                            }
                        }
                        None => {
                            let _ = snapshot_tx.send(Err(StoreError::SubscriptionClosed));
                            break;
                        }
                    },
                }
            }
            subscribe_document
                .unsubscribe(&document_id, &subscriber_id)
                .await;
        });

        Ok(Subscription::new(
            room_id.clone(),
            snapshot_rx,
            Some(cancel_tx),
            Some(worker),
        ))
    }
}
