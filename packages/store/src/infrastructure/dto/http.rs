//! HTTP API DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `PUT /api/documents/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    /// Top-level fields of the new document
    pub fields: Map<String, Value>,
    /// Field paths to stamp with the store time
    #[serde(default)]
    pub server_timestamps: Vec<String>,
    /// Fail with 409 instead of overwriting an existing document
    #[serde(default)]
    pub if_absent: bool,
}

/// Body of `PATCH /api/documents/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDocumentRequest {
    /// Dot-separated field path (e.g. `player1.choice`) to new value
    pub fields: Map<String, Value>,
    /// Field paths to stamp with the store time
    #[serde(default)]
    pub server_timestamps: Vec<String>,
}

/// A stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDto {
    pub id: String,
    pub version: u64,
    pub update_time: i64,
    pub data: Map<String, Value>,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
