//! HTTP / WebSocket interface of the document store.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
