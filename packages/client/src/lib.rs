//! Janken client.
//!
//! Two players share one match record in the Janken document store. Each
//! client writes only its own choice, renders every snapshot it receives,
//! resolves the round once both choices are visible and resets it a few
//! seconds after the result.

pub mod controller;
pub mod domain;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod store;
pub mod ui;
pub mod usecase;
