//! UseCase 層
//!
//! ドキュメントストアの操作（作成・取得・部分更新・購読）を実装します。
//! 書き込みを伴うユースケースは、書き込み後に最新のスナップショットを購読者へ publish します。

mod create_document;
mod error;
mod get_document;
mod subscribe_document;
mod update_document;

use std::sync::Arc;

use janken_shared::time::Clock;

use crate::infrastructure::{
    repository::InMemoryDocumentRepository, snapshot_pusher::ChannelSnapshotPusher,
};

pub use create_document::CreateDocumentUseCase;
pub use error::{CreateDocumentError, GetDocumentError, UpdateDocumentError};
pub use get_document::GetDocumentUseCase;
pub use subscribe_document::SubscribeDocumentUseCase;
pub use update_document::UpdateDocumentUseCase;

/// ストアの全ユースケース
///
/// UI 層（HTTP / WebSocket）とプロセス内の利用者が同じ組み立てを共有するためのまとまり。
#[derive(Clone)]
pub struct StoreUseCases {
    pub create_document: Arc<CreateDocumentUseCase>,
    pub get_document: Arc<GetDocumentUseCase>,
    pub update_document: Arc<UpdateDocumentUseCase>,
    pub subscribe_document: Arc<SubscribeDocumentUseCase>,
}

impl StoreUseCases {
    /// インメモリのバックエンドでユースケースを組み立てる
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        // Initialize dependencies in order:
        // 1. Repository
        // 2. SnapshotPusher
        // 3. UseCases

        // 1. Create Repository (in-memory database)
        let repository = Arc::new(InMemoryDocumentRepository::new());

        // 2. Create SnapshotPusher (channel implementation)
        let snapshot_pusher = Arc::new(ChannelSnapshotPusher::new());

        // 3. Create UseCases
        Self {
            create_document: Arc::new(CreateDocumentUseCase::new(
                repository.clone(),
                snapshot_pusher.clone(),
                clock.clone(),
            )),
            get_document: Arc::new(GetDocumentUseCase::new(repository.clone())),
            update_document: Arc::new(UpdateDocumentUseCase::new(
                repository.clone(),
                snapshot_pusher.clone(),
                clock,
            )),
            subscribe_document: Arc::new(SubscribeDocumentUseCase::new(
                repository,
                snapshot_pusher,
            )),
        }
    }
}
