//! Config validation, run after defaults are applied.

use std::collections::HashSet;

use anyhow::{bail, Result};

use crate::schema::MeshAuthConfig;

/// Reject configs the daemon cannot run with.
pub fn validate(config: &MeshAuthConfig) -> Result<()> {
    if let Some(auth) = &config.auth {
        if auth.signal_backoff_secs == Some(0) {
            bail!("auth.signalBackoffSecs must be greater than zero");
        }
        if auth.signal_queue_size == Some(0) {
            bail!("auth.signalQueueSize must be greater than zero");
        }
        if auth.rotation_queue_size == Some(0) {
            bail!("auth.rotationQueueSize must be greater than zero");
        }
    }

    let mut node_ids = HashSet::new();
    for node in &config.nodes {
        if !node_ids.insert(node.id) {
            bail!("duplicate node id in static node table: {}", node.id);
        }
    }

    Ok(())
}
