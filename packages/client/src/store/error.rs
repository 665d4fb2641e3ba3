//! Store access errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Create-if-absent hit an existing document
    #[error("Document '{0}' already exists")]
    AlreadyExists(String),

    /// Partial update of a missing document
    #[error("Document '{0}' not found")]
    NotFound(String),

    /// The store answered but refused the request
    #[error("Store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Connection error: {0}")]
    Connection(String),

    /// A document or message did not match the match record layout
    #[error("Failed to decode match record: {0}")]
    Decode(String),

    #[error("Subscription closed by the store")]
    SubscriptionClosed,
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Connection(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}
