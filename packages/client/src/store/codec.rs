//! Conversion between match types and the store's wire DTOs.

use janken_store::{
    domain::DocumentId,
    infrastructure::dto::{
        http::{CreateDocumentRequest, UpdateDocumentRequest},
        websocket::SnapshotMessage,
    },
};
use serde_json::{Map, Value};

use super::{error::StoreError, subscription::Snapshot};
use crate::domain::{LAST_UPDATED_FIELD, MatchRecord, MatchUpdate, RoomId};

pub(crate) fn document_id(room_id: &RoomId) -> Result<DocumentId, StoreError> {
    DocumentId::new(room_id.as_str().to_string()).map_err(|e| StoreError::Rejected {
        status: 400,
        message: e.to_string(),
    })
}

/// Full record as a create-if-absent request; `lastUpdated` is stamped by the store.
pub(crate) fn create_request(record: &MatchRecord) -> Result<CreateDocumentRequest, StoreError> {
    let mut fields = match serde_json::to_value(record)? {
        Value::Object(map) => map,
        other => {
            return Err(StoreError::Decode(format!(
                "match record serialized to {other}"
            )));
        }
    };
    fields.remove(LAST_UPDATED_FIELD);

    Ok(CreateDocumentRequest {
        fields,
        server_timestamps: vec![LAST_UPDATED_FIELD.to_string()],
        if_absent: true,
    })
}

pub(crate) fn update_request(update: &MatchUpdate) -> Result<UpdateDocumentRequest, StoreError> {
    let fields = update
        .fields()
        .iter()
        .map(|field| Ok((field.path().to_string(), field.to_value()?)))
        .collect::<Result<Map<String, Value>, serde_json::Error>>()?;

    Ok(UpdateDocumentRequest {
        fields,
        server_timestamps: vec![LAST_UPDATED_FIELD.to_string()],
    })
}

pub(crate) fn decode_record(data: Map<String, Value>) -> Result<MatchRecord, StoreError> {
    Ok(serde_json::from_value(Value::Object(data))?)
}

/// Decodes one pushed snapshot message.
pub(crate) fn decode_snapshot(text: &str) -> Result<Snapshot, StoreError> {
    let message: SnapshotMessage = serde_json::from_str(text)?;
    let record = match (message.exists, message.data) {
        (true, Some(data)) => Some(decode_record(data)?),
        (true, None) => {
            return Err(StoreError::Decode(format!(
                "snapshot v{} of '{}' has no data",
                message.version, message.document_id
            )));
        }
        (false, _) => None,
    };

    Ok(Snapshot {
        version: message.version,
        record,
    })
}
