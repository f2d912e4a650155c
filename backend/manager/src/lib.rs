//! Mutual-authentication orchestration for the datapath.
//!
//! Turns the datapath's "authentication required" signals and handler
//! credential-rotation events into at-most-one in-flight authentication
//! attempt per key, with results written to the shared auth map.

pub mod always_fail;
pub mod manager;
pub mod pending;
pub mod service;

#[cfg(test)]
pub(crate) mod testutil;

pub use always_fail::AlwaysFailHandler;
pub use manager::AuthManager;
pub use pending::{PendingGuard, PendingTable};
pub use service::{spawn_component, RotationMonitor, SignalMonitor};
