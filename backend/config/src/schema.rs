//! meshauth daemon configuration schema.
//!
//! Typed for serde YAML/JSON deserialization. Every field is optional in
//! the file; effective values fall back to the constants in
//! [`crate::defaults`].

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_ROTATION_QUEUE_SIZE, DEFAULT_SIGNAL_BACKOFF_SECS, DEFAULT_SIGNAL_QUEUE_SIZE,
};

/// Root configuration for the meshauth daemon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshAuthConfig {
    /// Authentication orchestration settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthSection>,

    /// Logging configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingSection>,

    /// Static node table, seeded into the node registry at startup.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeEntry>,
}

impl MeshAuthConfig {
    /// Effective minimum interval between non-forced re-authentications
    /// of one key.
    pub fn signal_backoff_secs(&self) -> u64 {
        self.auth
            .as_ref()
            .and_then(|a| a.signal_backoff_secs)
            .unwrap_or(DEFAULT_SIGNAL_BACKOFF_SECS)
    }

    /// Effective capacity of the datapath signal channel.
    pub fn signal_queue_size(&self) -> usize {
        self.auth
            .as_ref()
            .and_then(|a| a.signal_queue_size)
            .unwrap_or(DEFAULT_SIGNAL_QUEUE_SIZE)
    }

    /// Effective capacity of each handler rotation-event channel.
    pub fn rotation_queue_size(&self) -> usize {
        self.auth
            .as_ref()
            .and_then(|a| a.rotation_queue_size)
            .unwrap_or(DEFAULT_ROTATION_QUEUE_SIZE)
    }

    /// Whether the fault-injection handler is registered.
    pub fn enable_always_fail(&self) -> bool {
        self.auth
            .as_ref()
            .and_then(|a| a.enable_always_fail)
            .unwrap_or(false)
    }
}

/// Settings of the authentication orchestration core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSection {
    /// Minimum seconds between non-forced re-authentications of one key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_backoff_secs: Option<u64>,

    /// Buffer size of the datapath signal channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_queue_size: Option<usize>,

    /// Buffer size of each handler rotation-event channel, consumed by
    /// handlers constructed out of tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_queue_size: Option<usize>,

    /// Register the fault-injection handler that rejects every attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_always_fail: Option<bool>,
}

/// One static node table entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeEntry {
    /// Datapath node identifier.
    pub id: u16,
    /// Address auth handlers reach the node at.
    pub ip: std::net::IpAddr,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingSection {
    /// Log level directive (`error`, `warn`, `info`, `debug`, `trace`,
    /// or a full filter expression). `RUST_LOG` wins over this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Emit NDJSON records instead of the human-readable format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}
