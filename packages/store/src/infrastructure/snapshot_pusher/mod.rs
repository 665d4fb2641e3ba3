//! スナップショット送信（通知）の実装
//!
//! ## 実装
//!
//! - `channel`: `UnboundedSender<String>` を使った実装。
//!   WebSocket ハンドラとプロセス内の購読者の両方がこのチャンネルを受け取ります。

pub mod channel;

pub use channel::ChannelSnapshotPusher;
