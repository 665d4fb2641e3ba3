//! Shared helpers for the client integration tests.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use janken_client::{
    controller::{LocalIntent, Renderer, SessionConfig, SessionController},
    domain::{Choice, MatchRecord, MatchView, RoomId, StatusLine},
    session::Session,
    store::MatchStore,
    usecase::SessionError,
};
use janken_shared::time::SystemClock;
use janken_store::{ui::Server, usecase::StoreUseCases};
use tokio::{
    net::TcpListener,
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

/// Reset delay used by the test players
pub const TEST_RESET_DELAY: Duration = Duration::from_millis(50);

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Document store served on an ephemeral port, shut down on drop
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server = Server::new(StoreUseCases::in_memory(Arc::new(SystemClock)));
        let handle = tokio::spawn(async move {
            server
                .serve(listener, async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Test server failed");
        });

        TestServer {
            addr,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    /// HTTP base URL of this server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle.abort();
    }
}

struct RecordingRenderer {
    views: Arc<Mutex<Vec<MatchView>>>,
    errors: Arc<Mutex<Vec<SessionError>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &MatchView) {
        self.views.lock().unwrap().push(view.clone());
    }

    fn show_error(&mut self, error: &SessionError) {
        self.errors.lock().unwrap().push(error.clone());
    }
}

/// A session driven by its own controller task
pub struct TestPlayer {
    intents: mpsc::UnboundedSender<LocalIntent>,
    views: Arc<Mutex<Vec<MatchView>>>,
    errors: Arc<Mutex<Vec<SessionError>>>,
    handle: JoinHandle<Result<(), SessionError>>,
}

impl TestPlayer {
    pub fn spawn(store: Arc<dyn MatchStore>, session: Session) -> Self {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let views = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(Mutex::new(Vec::new()));
        let mut renderer = RecordingRenderer {
            views: views.clone(),
            errors: errors.clone(),
        };
        let controller = SessionController::new(
            store,
            SessionConfig {
                reset_delay: TEST_RESET_DELAY,
            },
        );

        let handle = tokio::spawn(async move {
            controller.run(session, intent_rx, &mut renderer).await
        });

        TestPlayer {
            intents: intent_tx,
            views,
            errors,
            handle,
        }
    }

    /// Waits until the match has started on this player's screen
    pub async fn wait_for_opponent(&self) {
        wait_until(|| {
            self.last_view()
                .is_some_and(|view| view.status_line == StatusLine::MakeYourChoice)
        })
        .await;
    }

    pub fn choose(&self, choice: Choice) {
        self.intents
            .send(LocalIntent::Choose(choice))
            .expect("Controller stopped");
    }

    pub fn status_lines(&self) -> Vec<StatusLine> {
        self.views
            .lock()
            .unwrap()
            .iter()
            .map(|view| view.status_line.clone())
            .collect()
    }

    pub fn last_view(&self) -> Option<MatchView> {
        self.views.lock().unwrap().last().cloned()
    }

    pub fn errors(&self) -> Vec<SessionError> {
        self.errors.lock().unwrap().clone()
    }

    /// Sends Leave and waits for the controller to finish
    pub async fn leave(self) -> Result<(), SessionError> {
        let _ = self.intents.send(LocalIntent::Leave);
        self.handle.await.expect("Controller task panicked")
    }
}

/// Polls until `condition` holds or the timeout elapses
pub async fn wait_until<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    let result = tokio::time::timeout(WAIT_TIMEOUT, async {
        while !condition() {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await;
    assert!(result.is_ok(), "condition not met within {WAIT_TIMEOUT:?}");
}

/// Polls the store until the room's record matches `predicate`
pub async fn wait_for_record<P>(store: &dyn MatchStore, room_id: &RoomId, predicate: P) -> MatchRecord
where
    P: Fn(&MatchRecord) -> bool,
{
    let result = tokio::time::timeout(WAIT_TIMEOUT, async {
        loop {
            if let Ok(Some(record)) = store.get(room_id).await {
                if predicate(&record) {
                    return record;
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await;
    result.unwrap_or_else(|_| panic!("record of '{room_id}' did not reach the expected state"))
}

/// Waits for a fresh round and lets any duplicate reset write land
pub async fn wait_for_fresh_round(store: &dyn MatchStore, room_id: &RoomId) -> MatchRecord {
    let record = wait_for_record(store, room_id, |record| {
        record.status == janken_client::domain::MatchStatus::Playing
            && record.both_choices().is_none()
            && record.seat1.as_ref().is_some_and(|p| p.choice.is_none())
            && record.seat2.as_ref().is_some_and(|p| p.choice.is_none())
    })
    .await;
    tokio::time::sleep(TEST_RESET_DELAY * 4).await;
    record
}
