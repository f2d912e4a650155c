use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{Identity, NodeId};

/// Authentication protocol selected for a key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum AuthType {
    /// No authentication required.
    Disabled = 0,
    /// Certificate-based mutual TLS handshake.
    MutualTls = 1,
    /// Fault-injection handler that rejects every attempt.
    AlwaysFail = 2,
}

impl AuthType {
    /// Datapath wire representation of this auth type.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse the datapath wire representation.
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(AuthType::Disabled),
            1 => Some(AuthType::MutualTls),
            2 => Some(AuthType::AlwaysFail),
            _ => None,
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthType::Disabled => "disabled",
            AuthType::MutualTls => "mtls",
            AuthType::AlwaysFail => "always-fail",
        };
        write!(f, "{name}")
    }
}

/// Identifies one directional authentication relationship.
///
/// Equality is structural over all four fields; the key is used as-is in
/// the auth map and the pending table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthKey {
    pub local: Identity,
    pub remote: Identity,
    pub remote_node_id: NodeId,
    pub auth_type: AuthType,
}

impl fmt::Display for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "local={} remote={} node={} type={}",
            self.local, self.remote, self.remote_node_id, self.auth_type
        )
    }
}

/// Cached result of a successful authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthInfo {
    /// When the established trust goes stale.
    pub expiration: DateTime<Utc>,
    /// When this record was written.
    pub stored_at: DateTime<Utc>,
}

/// One authentication attempt, handed to exactly one handler.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub local: Identity,
    pub remote: Identity,
    pub remote_node_ip: IpAddr,
}

/// A handler's answer to an [`AuthRequest`].
#[derive(Debug, Clone, Copy)]
pub struct AuthResponse {
    /// Expiration proposed by the handler for the established trust.
    pub expiration: DateTime<Utc>,
}

/// Credential-rotation notification for one identity.
#[derive(Debug, Clone, Copy)]
pub struct CertificateRotationEvent {
    pub identity: Identity,
    /// True when the identity was removed rather than rotated.
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_type_wire_roundtrip() {
        assert_eq!(AuthType::from_u8(0), Some(AuthType::Disabled));
        assert_eq!(AuthType::from_u8(1), Some(AuthType::MutualTls));
        assert_eq!(AuthType::from_u8(2), Some(AuthType::AlwaysFail));
        assert_eq!(AuthType::from_u8(3), None);
        assert_eq!(AuthType::MutualTls.as_u8(), 1);
    }

    #[test]
    fn auth_key_display_names_all_fields() {
        let key = AuthKey {
            local: Identity(1001),
            remote: Identity(2002),
            remote_node_id: NodeId(7),
            auth_type: AuthType::MutualTls,
        };
        assert_eq!(key.to_string(), "local=1001 remote=2002 node=7 type=mtls");
    }
}
