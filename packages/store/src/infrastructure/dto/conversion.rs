//! Conversion logic between DTOs and domain entities.

use serde_json::{Map, Value};

use crate::domain::{
    CreateMode, Document, DocumentSnapshot, FieldPath, FieldWrite, ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket};

// ========================================
// DTO → Domain
// ========================================

impl http::CreateDocumentRequest {
    /// Convert into domain writes and the create mode.
    ///
    /// Keys of `fields` must be top-level field names.
    pub fn into_domain(self) -> Result<(Vec<FieldWrite>, CreateMode), ValueObjectError> {
        if let Some(nested) = self.fields.keys().find(|key| key.contains('.')) {
            return Err(ValueObjectError::InvalidFieldPath(nested.clone()));
        }
        let writes = to_field_writes(self.fields, self.server_timestamps)?;
        let mode = if self.if_absent {
            CreateMode::IfAbsent
        } else {
            CreateMode::Overwrite
        };
        Ok((writes, mode))
    }
}

impl http::UpdateDocumentRequest {
    /// Convert into domain writes. Keys of `fields` are dot-separated paths.
    pub fn into_domain(self) -> Result<Vec<FieldWrite>, ValueObjectError> {
        to_field_writes(self.fields, self.server_timestamps)
    }
}

/// Plain values are written first, server timestamps last.
fn to_field_writes(
    fields: Map<String, Value>,
    server_timestamps: Vec<String>,
) -> Result<Vec<FieldWrite>, ValueObjectError> {
    let values = fields.into_iter().map(|(path, value)| {
        FieldPath::parse(&path).map(|path| FieldWrite::value(path, value))
    });
    let timestamps = server_timestamps
        .iter()
        .map(|path| FieldPath::parse(path).map(FieldWrite::server_timestamp));
    values.chain(timestamps).collect()
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Document> for http::DocumentDto {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id.as_str().to_string(),
            version: document.version,
            update_time: document.update_time.value(),
            data: document.fields.clone(),
        }
    }
}

impl From<&DocumentSnapshot> for websocket::SnapshotMessage {
    fn from(snapshot: &DocumentSnapshot) -> Self {
        let document = snapshot.document.as_ref();
        Self {
            r#type: websocket::MessageType::Snapshot,
            document_id: snapshot.id.as_str().to_string(),
            exists: document.is_some(),
            version: snapshot.version(),
            update_time: document.map(|d| d.update_time.value()),
            data: document.map(|d| d.fields.clone()),
        }
    }
}
