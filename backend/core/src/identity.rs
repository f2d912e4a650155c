use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the reserved identity range.
///
/// Identities below this value name well-known system entities (host,
/// world, health, ...) and never participate in mutual authentication.
pub const RESERVED_IDENTITY_BOUND: u32 = 256;

/// Numeric security identity of a workload.
///
/// An identity is a label assigned by the control plane, not an address;
/// two workloads with the same identity are interchangeable for policy
/// purposes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Identity(pub u32);

impl Identity {
    /// Whether this identity falls in the reserved sentinel range.
    pub fn is_reserved(&self) -> bool {
        self.0 < RESERVED_IDENTITY_BOUND
    }
}

impl From<u32> for Identity {
    fn from(raw: u32) -> Self {
        Identity(raw)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a remote node, assigned by the datapath.
///
/// Resolution to an address is delegated to a [`crate::NodeIpResolver`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u16);

impl From<u16> for NodeId {
    fn from(raw: u16) -> Self {
        NodeId(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
