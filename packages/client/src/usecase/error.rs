//! Errors surfaced to the local player.

use thiserror::Error;

use crate::{domain::ValidationError, store::StoreError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Room '{0}' is full")]
    RoomFull(String),

    /// Generated room code collided with an existing room
    #[error("Room code '{0}' is already in use, please try again")]
    RoomIdTaken(String),

    /// The record disappeared while the session was active
    #[error("Room '{0}' no longer exists")]
    RoomGone(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Errors caused by the player's input, as opposed to store or transport failures.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            SessionError::Validation(_)
                | SessionError::RoomNotFound(_)
                | SessionError::RoomFull(_)
                | SessionError::RoomIdTaken(_)
        )
    }
}
