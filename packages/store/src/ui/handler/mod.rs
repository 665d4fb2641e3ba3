//! Request handlers.

pub mod http;
pub mod websocket;

pub use http::{create_document, get_document, health_check, update_document};
pub use websocket::subscribe_handler;
