//! Validation errors raised before any store interaction.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Display name is empty after trimming
    #[error("Please enter your name")]
    EmptyName,

    /// Room code is empty or contains non-alphanumeric characters
    #[error("Invalid room code '{0}'")]
    InvalidRoomCode(String),
}
