//! WebSocket subscription handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{domain::DocumentId, ui::state::AppState};

/// `GET /ws/documents/{document_id}`: live snapshot subscription
pub async fn subscribe_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> DocumentId (Domain Model)
    let document_id = match DocumentId::try_from(document_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting subscription: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, document_id)))
}

/// Spawns a task that forwards serialized snapshots from `rx` to the WebSocket sink.
///
/// The task ends when the subscriber is unregistered (the channel closes) or
/// the socket rejects a send.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, document_id: DocumentId) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this subscriber and register it
    // (the initial snapshot is pushed inside the UseCase)
    let (tx, rx) = mpsc::unbounded_channel();
    let subscriber_id = state
        .usecases
        .subscribe_document
        .execute(&document_id, tx)
        .await;

    let mut push_task = pusher_loop(rx, sender);

    // Subscribers only listen; anything but Close is ignored
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut push_task => recv_task.abort(),
        _ = &mut recv_task => push_task.abort(),
    }

    state
        .usecases
        .subscribe_document
        .unsubscribe(&document_id, &subscriber_id)
        .await;
}
