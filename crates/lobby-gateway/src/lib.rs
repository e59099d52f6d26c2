//! # lobby-gateway
//!
//! WebSocket room coordinator: peers connect, receive an ephemeral identity, and
//! create or join named rooms whose membership is pushed to the room owner.

pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod rooms;
pub mod server;

pub use server::{create_app, create_gateway_state, run, GatewayState};
