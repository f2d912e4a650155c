//! In-process node registry backing the IP resolver contract.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::RwLock;

use tracing::debug;

use meshauth_core::{NodeId, NodeIpResolver};

/// Node-ID to IP mapping, maintained from node discovery updates.
#[derive(Default)]
pub struct NodeRegistry {
    nodes: RwLock<HashMap<NodeId, IpAddr>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or refresh the address of a node.
    pub fn upsert(&self, node_id: NodeId, ip: IpAddr) {
        if let Ok(mut nodes) = self.nodes.write() {
            nodes.insert(node_id, ip);
            debug!(node_id = %node_id, ip = %ip, "Node registered");
        }
    }
}

impl NodeIpResolver for NodeRegistry {
    fn node_ip(&self, node_id: NodeId) -> Option<IpAddr> {
        self.nodes.read().ok()?.get(&node_id).copied()
    }
}
