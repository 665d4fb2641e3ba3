//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    Snapshot,
}

/// Full current state of a document, pushed on subscribe and after every write
///
/// `version` is 0 and `data` is `None` when the document does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMessage {
    pub r#type: MessageType,
    pub document_id: String,
    pub exists: bool,
    pub version: u64,
    pub update_time: Option<i64>,
    pub data: Option<Map<String, Value>>,
}
