//! Data Transfer Objects (DTOs) for the document store.
//!
//! DTOs are organized by protocol:
//! - `websocket`: snapshot push messages
//! - `http`: HTTP API request / response bodies

pub mod conversion;
pub mod http;
pub mod websocket;
