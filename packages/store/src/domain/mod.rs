//! ドメイン層
//!
//! ドキュメントストアのドメインモデルと、ドメイン層が必要とする
//! インターフェース（Repository, SnapshotPusher）を定義します。

pub mod entity;
pub mod error;
pub mod repository;
pub mod snapshot_pusher;
pub mod value_object;

pub use entity::{Document, DocumentSnapshot};
pub use error::{PushError, RepositoryError, ValueObjectError};
pub use repository::{CreateMode, DocumentRepository};
pub use snapshot_pusher::{SnapshotChannel, SnapshotPusher};
pub use value_object::{
    DocumentId, FieldPath, FieldValue, FieldWrite, MAX_DOCUMENT_ID_LENGTH, SubscriberId, Timestamp,
};
