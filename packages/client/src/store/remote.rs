//! Match store client for a running `janken-store` server.
//!
//! Reads and writes go over the HTTP API (`/api/documents/{id}`); live
//! snapshots come over the WebSocket endpoint (`/ws/documents/{id}`).

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use janken_store::infrastructure::dto::http::{DocumentDto, ErrorResponse};
use reqwest::StatusCode;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{MatchStore, codec, error::StoreError, subscription::Subscription};
use crate::domain::{MatchRecord, MatchUpdate, RoomId};

pub struct RemoteMatchStore {
    http: reqwest::Client,
    base_url: String,
    ws_base_url: String,
}

impl RemoteMatchStore {
    /// `base_url` is the store's HTTP root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let ws_base_url = if let Some(rest) = base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            return Err(StoreError::Connection(format!(
                "unsupported store URL '{base_url}' (expected http:// or https://)"
            )));
        };

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            ws_base_url,
        })
    }

    fn document_url(&self, room_id: &RoomId) -> String {
        format!("{}/api/documents/{}", self.base_url, room_id)
    }

    fn subscription_url(&self, room_id: &RoomId) -> String {
        format!("{}/ws/documents/{}", self.ws_base_url, room_id)
    }
}

/// Builds the error for an unexpected response, preferring the store's error body.
async fn rejected(response: reqwest::Response) -> StoreError {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string(),
    };
    StoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl MatchStore for RemoteMatchStore {
    async fn create(&self, room_id: &RoomId, record: &MatchRecord) -> Result<(), StoreError> {
        let request = codec::create_request(record)?;
        let response = self
            .http
            .put(self.document_url(room_id))
            .json(&request)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => Ok(()),
            StatusCode::CONFLICT => Err(StoreError::AlreadyExists(room_id.to_string())),
            _ => Err(rejected(response).await),
        }
    }

    async fn get(&self, room_id: &RoomId) -> Result<Option<MatchRecord>, StoreError> {
        let response = self.http.get(self.document_url(room_id)).send().await?;

        match response.status() {
            StatusCode::OK => {
                let document: DocumentDto = response.json().await?;
                codec::decode_record(document.data).map(Some)
            }
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(rejected(response).await),
        }
    }

    async fn update(&self, room_id: &RoomId, update: &MatchUpdate) -> Result<(), StoreError> {
        let request = codec::update_request(update)?;
        let response = self
            .http
            .patch(self.document_url(room_id))
            .json(&request)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(room_id.to_string())),
            _ => Err(rejected(response).await),
        }
    }

    async fn subscribe(&self, room_id: &RoomId) -> Result<Subscription, StoreError> {
        let url = self.subscription_url(room_id);
        let (ws_stream, _) = connect_async(url.as_str())
            .await
            .map_err(|e| StoreError::Connection(format!("{url}: {e}")))?;
        tracing::debug!("Subscribed to {}", url);

        let (mut write, mut read) = ws_stream.split();
        let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
        let (cancel_tx, mut cancel_rx) = oneshot::channel();

        let worker = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut cancel_rx => {
                        // Close frame lets the server unregister the subscriber right away
                        let _ = write.send(Message::Close(None)).await;
                        break;
                    }
                    message = read.next() => match message {
                        Some(Ok(Message::Text(text))) => {
                            if snapshot_tx.send(codec::decode_snapshot(text.as_str())).is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            let _ = snapshot_tx.send(Err(StoreError::SubscriptionClosed));
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            let _ = snapshot_tx.send(Err(StoreError::Connection(e.to_string())));
                            break;
                        }
                    },
                }
            }
        });

        Ok(Subscription::new(
            room_id.clone(),
            snapshot_rx,
            Some(cancel_tx),
            Some(worker),
        ))
    }
}
