//! Connection management
//!
//! Sessions, live connections, their heartbeats, and the lifecycle that ties them to
//! the room registry.

mod connection;
mod heartbeat;
mod lifecycle;
mod manager;
mod session;

pub use connection::{Connection, ConnectionState};
pub use heartbeat::{HeartbeatMonitor, DEFAULT_HEARTBEAT_INTERVAL};
pub use lifecycle::ConnectionLifecycleManager;
pub use manager::ConnectionManager;
pub use session::Session;
