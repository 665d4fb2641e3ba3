//! Janken document store.
//!
//! An in-memory, strongly-consistent document store with create-if-absent
//! writes, partial-field updates by key path, point reads and live snapshot
//! subscriptions over WebSocket. Every change to a document pushes the full
//! current document to all of its subscribers.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
