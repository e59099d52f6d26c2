//! Integration test utilities for the lobby gateway
//!
//! This crate provides helpers for running end-to-end tests against
//! the WebSocket gateway and its health endpoint.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
