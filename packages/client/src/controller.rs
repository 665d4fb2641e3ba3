//! Session controller: the per-client event loop.
//!
//! One `tokio::select!` loop owns the session and reacts to three sources:
//!
//! - snapshots from the room subscription (render, then resolve or arm the reset)
//! - local intents from the player (submit a choice or leave)
//! - the reset timer
//!
//! At most one reset is pending at a time. A snapshot that no longer shows a
//! result disarms it, so a late timer never wipes choices of the next round.
//! Choices are ignored while the room is still waiting for an opponent.

use std::{str::FromStr, sync::Arc, time::Duration};

use janken_shared::time::timestamp_to_rfc3339;
use tokio::{
    sync::mpsc,
    time::{Instant, sleep_until},
};

use crate::{
    domain::{Choice, FollowUp, MatchStatus, MatchView, react},
    session::Session,
    store::{MatchStore, StoreError},
    usecase::{ResetRoundUseCase, ResolveRoundUseCase, SessionError, SubmitChoiceUseCase},
};

/// Delay between observing a result and resetting the round
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(3);

/// Presentation boundary
pub trait Renderer: Send {
    fn render(&mut self, view: &MatchView);
    fn show_error(&mut self, error: &SessionError);
}

/// Something the local player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalIntent {
    Choose(Choice),
    Leave,
}

impl LocalIntent {
    /// Parses a prompt line: a choice (`rock`, `r`, ...) or `quit`/`exit`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => Some(LocalIntent::Leave),
            other => Choice::from_str(other).ok().map(LocalIntent::Choose),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub reset_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

pub struct SessionController {
    submit_choice: SubmitChoiceUseCase,
    resolve_round: ResolveRoundUseCase,
    reset_round: ResetRoundUseCase,
    config: SessionConfig,
}

async fn wait_for_reset(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl SessionController {
    pub fn new(store: Arc<dyn MatchStore>, config: SessionConfig) -> Self {
        Self {
            submit_choice: SubmitChoiceUseCase::new(store.clone()),
            resolve_round: ResolveRoundUseCase::new(store.clone()),
            reset_round: ResetRoundUseCase::new(store),
            config,
        }
    }

    /// Runs the session until the player leaves or an error ends it.
    ///
    /// The subscription is closed exactly once on the way out, whatever the
    /// reason. Errors are shown through the renderer and returned.
    pub async fn run<R: Renderer>(
        &self,
        mut session: Session,
        mut intents: mpsc::UnboundedReceiver<LocalIntent>,
        renderer: &mut R,
    ) -> Result<(), SessionError> {
        let mut reset_deadline: Option<Instant> = None;
        let mut last_status: Option<MatchStatus> = None;

        let result = loop {
            tokio::select! {
                snapshot = session.next_snapshot() => {
                    let snapshot = match snapshot {
                        Some(Ok(snapshot)) => snapshot,
                        Some(Err(e)) => break Err(e.into()),
                        None => break Err(StoreError::SubscriptionClosed.into()),
                    };
                    let Some(record) = snapshot.record else {
                        break Err(SessionError::RoomGone(session.room_id().to_string()));
                    };
                    tracing::debug!(
                        "Snapshot v{} of room '{}' (last updated {})",
                        snapshot.version,
                        session.room_id(),
                        record
                            .last_updated
                            .and_then(timestamp_to_rfc3339)
                            .unwrap_or_else(|| "-".to_string())
                    );

                    last_status = Some(record.status);
                    let reaction = react(&record, session.seat());
                    renderer.render(&reaction.view);

                    match reaction.follow_up {
                        Some(FollowUp::Resolve(outcome)) => {
                            reset_deadline = None;
                            if let Err(e) = self.resolve_round.execute(&session, outcome).await {
                                break Err(e);
                            }
                        }
                        Some(FollowUp::ScheduleReset) => {
                            if reset_deadline.is_none() {
                                reset_deadline = Some(Instant::now() + self.config.reset_delay);
                            }
                        }
                        None => reset_deadline = None,
                    }
                }
                intent = intents.recv() => match intent {
                    Some(LocalIntent::Choose(choice))
                        if last_status == Some(MatchStatus::Waiting) =>
                    {
                        tracing::debug!("Ignoring {} while waiting for an opponent", choice);
                    }
                    Some(LocalIntent::Choose(choice)) => {
                        if let Err(e) = self.submit_choice.execute(&session, choice).await {
                            break Err(e);
                        }
                    }
                    Some(LocalIntent::Leave) | None => break Ok(()),
                },
                _ = wait_for_reset(reset_deadline) => {
                    reset_deadline = None;
                    if let Err(e) = self.reset_round.execute(&session).await {
                        break Err(e);
                    }
                }
            }
        };

        session.close().await;
        if let Err(e) = &result {
            renderer.show_error(e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            MatchRecord, MatchStatus, MatchUpdate, PlayerName, PlayerState, RoomId, Seat,
            StatusLine,
        },
        store::{MockMatchStore, Snapshot, Subscription},
    };
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRenderer {
        views: Vec<MatchView>,
        errors: Vec<SessionError>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, view: &MatchView) {
            self.views.push(view.clone());
        }

        fn show_error(&mut self, error: &SessionError) {
            self.errors.push(error.clone());
        }
    }

    fn record(status: MatchStatus, seat1: Option<Choice>, seat2: Option<Choice>) -> MatchRecord {
        let player = |name: &str, choice| PlayerState {
            choice,
            ..PlayerState::new(&PlayerName::new(name).unwrap())
        };
        MatchRecord {
            seat1: Some(player("Ann", seat1)),
            seat2: Some(player("Bob", seat2)),
            status,
            winner: None,
            last_updated: Some(1_700_000_000_000),
        }
    }

    type SnapshotSender = mpsc::UnboundedSender<Result<Snapshot, StoreError>>;

    fn session_with_feed(seat: Seat) -> (Session, SnapshotSender) {
        let room_id = RoomId::parse("AB12").unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = Subscription::new(room_id.clone(), rx, None, None);
        (Session::new(seat, room_id, subscription), tx)
    }

    fn recording_store(updates: Arc<Mutex<Vec<MatchUpdate>>>) -> MockMatchStore {
        let mut store = MockMatchStore::new();
        store.expect_update().returning(move |_, update| {
            updates.lock().unwrap().push(update.clone());
            Ok(())
        });
        store
    }

    #[test]
    fn test_parse_intents() {
        // テスト項目: プロンプトの入力が手の選択と退出に解釈される
        // given (前提条件):
        let lines = ["rock", " P ", "s", "quit", "dance"];

        // when (操作):
        let intents: Vec<Option<LocalIntent>> =
            lines.iter().map(|line| LocalIntent::parse(line)).collect();

        // then (期待する結果):
        assert_eq!(
            intents,
            vec![
                Some(LocalIntent::Choose(Choice::Rock)),
                Some(LocalIntent::Choose(Choice::Paper)),
                Some(LocalIntent::Choose(Choice::Scissors)),
                Some(LocalIntent::Leave),
                None,
            ]
        );
    }

    #[tokio::test]
    async fn test_choice_intent_is_written() {
        // テスト項目: 手の選択は自分の席の choice への書き込みになる
        // given (前提条件):
        let updates = Arc::new(Mutex::new(Vec::new()));
        let controller = SessionController::new(
            Arc::new(recording_store(updates.clone())),
            SessionConfig::default(),
        );
        let (session, _feed) = session_with_feed(Seat::Two);
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        intent_tx.send(LocalIntent::Choose(Choice::Paper)).unwrap();
        intent_tx.send(LocalIntent::Leave).unwrap();
        let mut renderer = RecordingRenderer::default();

        // when (操作):
        let result = controller.run(session, intent_rx, &mut renderer).await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        assert_eq!(
            *updates.lock().unwrap(),
            vec![MatchUpdate::submit_choice(Seat::Two, Choice::Paper)]
        );
    }

    #[tokio::test]
    async fn test_both_choices_resolve_then_reset_after_delay() {
        // テスト項目: 両者の手が揃うと解決を書き込み、結果を見てから遅延後にリセットする
        // given (前提条件):
        tokio::time::pause();
        let updates = Arc::new(Mutex::new(Vec::new()));
        let controller = SessionController::new(
            Arc::new(recording_store(updates.clone())),
            SessionConfig::default(),
        );
        let (session, feed) = session_with_feed(Seat::One);
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut renderer = RecordingRenderer::default();
            let result = controller.run(session, intent_rx, &mut renderer).await;
            (result, renderer)
        });

        // when (操作):
        feed.send(Ok(Snapshot {
            version: 4,
            record: Some(record(
                MatchStatus::Playing,
                Some(Choice::Rock),
                Some(Choice::Scissors),
            )),
        }))
        .unwrap();
        let mut result_record = record(
            MatchStatus::Result,
            Some(Choice::Rock),
            Some(Choice::Scissors),
        );
        result_record.winner = Some(Seat::One);
        feed.send(Ok(Snapshot {
            version: 5,
            record: Some(result_record),
        }))
        .unwrap();
        tokio::time::sleep(DEFAULT_RESET_DELAY + Duration::from_millis(100)).await;
        intent_tx.send(LocalIntent::Leave).unwrap();
        let (result, renderer) = handle.await.unwrap();

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        assert_eq!(
            *updates.lock().unwrap(),
            vec![
                MatchUpdate::resolve(crate::domain::RoundOutcome::Winner(Seat::One)),
                MatchUpdate::reset_round(),
            ]
        );
        assert_eq!(
            renderer.views.last().map(|v| v.status_line.to_string()),
            Some("You win! rock beats scissors".to_string())
        );
    }

    #[tokio::test]
    async fn test_reset_is_disarmed_when_round_already_reset() {
        // テスト項目: 相手が先にリセットした場合、自分のリセットは行わない
        // given (前提条件):
        tokio::time::pause();
        let updates = Arc::new(Mutex::new(Vec::new()));
        let controller = SessionController::new(
            Arc::new(recording_store(updates.clone())),
            SessionConfig::default(),
        );
        let (session, feed) = session_with_feed(Seat::Two);
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut renderer = RecordingRenderer::default();
            controller.run(session, intent_rx, &mut renderer).await
        });

        // when (操作):
        let mut result_record = record(MatchStatus::Result, Some(Choice::Paper), Some(Choice::Paper));
        result_record.winner = None;
        feed.send(Ok(Snapshot {
            version: 5,
            record: Some(result_record),
        }))
        .unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        feed.send(Ok(Snapshot {
            version: 6,
            record: Some(record(MatchStatus::Playing, None, None)),
        }))
        .unwrap();
        tokio::time::sleep(DEFAULT_RESET_DELAY * 2).await;
        intent_tx.send(LocalIntent::Leave).unwrap();
        let result = handle.await.unwrap();

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        assert!(updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_result_snapshots_schedule_one_reset() {
        // テスト項目: 結果のスナップショットが重なってもリセットは 1 回だけ
        // given (前提条件):
        tokio::time::pause();
        let updates = Arc::new(Mutex::new(Vec::new()));
        let controller = SessionController::new(
            Arc::new(recording_store(updates.clone())),
            SessionConfig::default(),
        );
        let (session, feed) = session_with_feed(Seat::One);
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut renderer = RecordingRenderer::default();
            controller.run(session, intent_rx, &mut renderer).await
        });

        // when (操作):
        for version in [5, 6] {
            let mut result_record =
                record(MatchStatus::Result, Some(Choice::Rock), Some(Choice::Paper));
            result_record.winner = Some(Seat::Two);
            feed.send(Ok(Snapshot {
                version,
                record: Some(result_record),
            }))
            .unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        tokio::time::sleep(DEFAULT_RESET_DELAY * 2).await;
        intent_tx.send(LocalIntent::Leave).unwrap();
        let result = handle.await.unwrap();

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        assert_eq!(*updates.lock().unwrap(), vec![MatchUpdate::reset_round()]);
    }

    #[tokio::test]
    async fn test_choice_is_ignored_while_waiting_for_opponent() {
        // テスト項目: 相手が参加するまでは手の選択を書き込まない
        // given (前提条件):
        tokio::time::pause();
        let updates = Arc::new(Mutex::new(Vec::new()));
        let controller = SessionController::new(
            Arc::new(recording_store(updates.clone())),
            SessionConfig::default(),
        );
        let (session, feed) = session_with_feed(Seat::One);
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut renderer = RecordingRenderer::default();
            controller.run(session, intent_rx, &mut renderer).await
        });
        feed.send(Ok(Snapshot {
            version: 1,
            record: Some(MatchRecord::new_waiting(&PlayerName::new("Ann").unwrap())),
        }))
        .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // when (操作):
        intent_tx.send(LocalIntent::Choose(Choice::Rock)).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        feed.send(Ok(Snapshot {
            version: 2,
            record: Some(record(MatchStatus::Playing, None, None)),
        }))
        .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        intent_tx.send(LocalIntent::Choose(Choice::Paper)).unwrap();
        intent_tx.send(LocalIntent::Leave).unwrap();
        let result = handle.await.unwrap();

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        assert_eq!(
            *updates.lock().unwrap(),
            vec![MatchUpdate::submit_choice(Seat::One, Choice::Paper)]
        );
    }

    #[tokio::test]
    async fn test_missing_room_ends_session_with_error() {
        // テスト項目: ルームが存在しないスナップショットを受け取るとエラーで終了する
        // given (前提条件):
        let mut store = MockMatchStore::new();
        store.expect_update().never();
        let controller = SessionController::new(Arc::new(store), SessionConfig::default());
        let (session, feed) = session_with_feed(Seat::Two);
        let (_intent_tx, intent_rx) = mpsc::unbounded_channel();
        feed.send(Ok(Snapshot {
            version: 0,
            record: None,
        }))
        .unwrap();
        let mut renderer = RecordingRenderer::default();

        // when (操作):
        let result = controller.run(session, intent_rx, &mut renderer).await;

        // then (期待する結果):
        assert_eq!(result, Err(SessionError::RoomGone("AB12".to_string())));
        assert_eq!(renderer.errors, vec![SessionError::RoomGone("AB12".to_string())]);
        assert!(renderer.views.is_empty());
    }

    #[tokio::test]
    async fn test_dropped_subscription_is_surfaced() {
        // テスト項目: 購読が切れた場合は黙って止まらずにエラーを表示する
        // given (前提条件):
        let store = MockMatchStore::new();
        let controller = SessionController::new(Arc::new(store), SessionConfig::default());
        let (session, feed) = session_with_feed(Seat::One);
        let (_intent_tx, intent_rx) = mpsc::unbounded_channel();
        feed.send(Ok(Snapshot {
            version: 2,
            record: Some(record(MatchStatus::Playing, None, None)),
        }))
        .unwrap();
        drop(feed);
        let mut renderer = RecordingRenderer::default();

        // when (操作):
        let result = controller.run(session, intent_rx, &mut renderer).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SessionError::Store(StoreError::SubscriptionClosed))
        );
        assert_eq!(renderer.views.len(), 1);
        assert_eq!(renderer.views[0].status_line, StatusLine::MakeYourChoice);
        assert_eq!(renderer.errors.len(), 1);
    }
}
