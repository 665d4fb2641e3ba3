//! Infrastructure 層
//!
//! - `repository`: ドキュメントの保存先
//! - `snapshot_pusher`: 購読者へのスナップショット送信
//! - `dto`: HTTP / WebSocket のメッセージ形式

pub mod dto;
pub mod repository;
pub mod snapshot_pusher;
