//! Shared utilities for the Janken store and client.

pub mod logger;
pub mod time;
