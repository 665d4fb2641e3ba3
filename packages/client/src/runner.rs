//! Client runner: wires the store, the session and the terminal together.

use std::{sync::Arc, time::Duration};

use rustyline::{DefaultEditor, error::ReadlineError};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    controller::{LocalIntent, SessionConfig, SessionController},
    formatter::MatchFormatter,
    session::Session,
    store::{MatchStore, RemoteMatchStore},
    ui::{TerminalRenderer, prompt, redisplay_prompt},
    usecase::{CreateMatchUseCase, JoinMatchUseCase, SessionError},
};

/// What the player asked for on the command line
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub store_url: String,
    pub name: String,
    /// Join this room; create a new one when `None`
    pub room: Option<String>,
    pub reset_delay: Duration,
}

/// How a client run failed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Creating or joining failed; nothing has been shown yet
    #[error(transparent)]
    Start(SessionError),

    /// The session ended with an error the renderer already showed
    #[error(transparent)]
    Session(SessionError),
}

impl ClientError {
    pub fn already_shown(&self) -> bool {
        matches!(self, ClientError::Session(_))
    }

    pub fn is_user_facing(&self) -> bool {
        match self {
            ClientError::Start(e) | ClientError::Session(e) => e.is_user_facing(),
        }
    }
}

/// Creates or joins a room, then plays until the player leaves.
pub async fn run_client(options: ClientOptions) -> Result<(), ClientError> {
    let store: Arc<dyn MatchStore> = Arc::new(
        RemoteMatchStore::new(&options.store_url)
            .map_err(|e| ClientError::Start(e.into()))?,
    );

    let session = start_session(store.clone(), &options)
        .await
        .map_err(ClientError::Start)?;
    print!(
        "{}",
        MatchFormatter::format_session_started(session.room_id(), session.seat())
    );
    print!("{}", MatchFormatter::format_help());

    let mut renderer = TerminalRenderer::new(session.room_id().clone(), &options.name);
    let intents = spawn_prompt(options.name.trim().to_string());

    let controller = SessionController::new(
        store,
        SessionConfig {
            reset_delay: options.reset_delay,
        },
    );
    controller
        .run(session, intents, &mut renderer)
        .await
        .map_err(ClientError::Session)
}

async fn start_session(
    store: Arc<dyn MatchStore>,
    options: &ClientOptions,
) -> Result<Session, SessionError> {
    match &options.room {
        Some(room) => {
            JoinMatchUseCase::new(store)
                .execute(room, &options.name)
                .await
        }
        None => CreateMatchUseCase::new(store).execute(&options.name).await,
    }
}

/// Reads prompt lines on a blocking thread and turns them into intents.
///
/// The channel closes when the player hits Ctrl+C / Ctrl+D, which the
/// controller treats as leaving.
fn spawn_prompt(name: String) -> mpsc::UnboundedReceiver<LocalIntent> {
    let (intent_tx, intent_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = prompt(&name);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();

                    match LocalIntent::parse(line) {
                        Some(intent) => {
                            let leaving = intent == LocalIntent::Leave;
                            if intent_tx.send(intent).is_err() || leaving {
                                break;
                            }
                        }
                        None => {
                            print!("{}", MatchFormatter::format_help());
                            redisplay_prompt(&name);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    intent_rx
}
