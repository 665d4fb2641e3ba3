//! UseCase 層
//!
//! ラウンドのプロトコルを構成する書き込み（作成・参加・手の送信・解決・リセット）を
//! 1 ユースケース 1 書き込みで実装します。どの書き込みも `lastUpdated` にサーバー時刻を記録します。

mod create_match;
mod error;
mod join_match;
mod reset_round;
mod resolve_round;
mod submit_choice;

pub use create_match::CreateMatchUseCase;
pub use error::SessionError;
pub use join_match::JoinMatchUseCase;
pub use reset_round::ResetRoundUseCase;
pub use resolve_round::ResolveRoundUseCase;
pub use submit_choice::SubmitChoiceUseCase;

use crate::{domain::RoomId, store::StoreError};

/// Maps a failed write inside an active session.
fn session_write_error(room_id: &RoomId, error: StoreError) -> SessionError {
    match error {
        StoreError::NotFound(_) => SessionError::RoomGone(room_id.to_string()),
        other => SessionError::Store(other),
    }
}
