//! Wire format of the "authentication required" records raised by the
//! datapath.
//!
//! The datapath emits a fixed-layout little-endian record per signal:
//!
//! ```text
//! struct auth_key {
//!     __u32 local_identity;
//!     __u32 remote_identity;
//!     __u16 remote_node_id;
//!     __u8  auth_type;
//!     __u8  pad;
//! };
//! ```
//!
//! Field order and widths are part of the contract with the kernel side
//! and must not change independently of it.

use thiserror::Error;

use meshauth_core::{AuthKey, AuthType, Identity, NodeId};

/// Exact size of one signal record, including the trailing pad byte.
pub const SIGNAL_RECORD_LEN: usize = 12;

/// Malformed signal record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignalError {
    #[error("signal record has {len} bytes, expected {}", SIGNAL_RECORD_LEN)]
    BadLength { len: usize },

    #[error("unknown auth type in signal record: {0}")]
    UnknownAuthType(u8),
}

/// One decoded "authentication required" signal.
///
/// Mirrors the datapath's `auth_key` struct field for field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalAuthKey {
    pub local_identity: Identity,
    pub remote_identity: Identity,
    pub remote_node_id: NodeId,
    pub auth_type: AuthType,
}

impl SignalAuthKey {
    /// Decode one record as produced by the datapath.
    pub fn decode(buf: &[u8]) -> Result<Self, SignalError> {
        if buf.len() != SIGNAL_RECORD_LEN {
            return Err(SignalError::BadLength { len: buf.len() });
        }

        let local = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let remote = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let node = u16::from_le_bytes([buf[8], buf[9]]);
        let auth_type =
            AuthType::from_u8(buf[10]).ok_or(SignalError::UnknownAuthType(buf[10]))?;
        // buf[11] is struct padding.

        Ok(Self {
            local_identity: Identity(local),
            remote_identity: Identity(remote),
            remote_node_id: NodeId(node),
            auth_type,
        })
    }

    /// Encode into the datapath record layout. Used by userspace
    /// producers and the loopback tests.
    pub fn encode(&self) -> [u8; SIGNAL_RECORD_LEN] {
        let mut buf = [0u8; SIGNAL_RECORD_LEN];
        buf[0..4].copy_from_slice(&self.local_identity.0.to_le_bytes());
        buf[4..8].copy_from_slice(&self.remote_identity.0.to_le_bytes());
        buf[8..10].copy_from_slice(&self.remote_node_id.0.to_le_bytes());
        buf[10] = self.auth_type.as_u8();
        buf
    }
}

impl From<SignalAuthKey> for AuthKey {
    fn from(signal: SignalAuthKey) -> Self {
        AuthKey {
            local: signal.local_identity,
            remote: signal.remote_identity,
            remote_node_id: signal.remote_node_id,
            auth_type: signal.auth_type,
        }
    }
}
