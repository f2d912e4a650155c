use std::net::IpAddr;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AuthError;
use crate::identity::NodeId;
use crate::status::CertProviderStatus;
use crate::types::{AuthRequest, AuthResponse, AuthType, CertificateRotationEvent};

/// Trait for the long-lived meshauth dispatch loops (signal intake,
/// rotation intake).
///
/// Each component consumes items from its channel in its own Tokio task
/// and must never block the loop on a full authentication cycle.
#[async_trait]
pub trait Component: Send + Sync + 'static {
    /// Item type consumed from the channel.
    type Item: Send + 'static;

    /// Human-readable name of this component.
    fn name(&self) -> &str;

    /// Run the consumption loop until the channel closes.
    async fn run(&self, rx: mpsc::Receiver<Self::Item>) -> Result<()>;
}

/// Handles authentication for one specific auth type.
#[async_trait]
pub trait AuthHandler: Send + Sync {
    /// Perform the protocol exchange for one request. May block on
    /// network I/O; callers run it from a dedicated task.
    async fn authenticate(&self, request: &AuthRequest) -> Result<AuthResponse, AuthError>;

    /// Fixed auth type this handler serves; used as the registry key.
    fn auth_type(&self) -> AuthType;

    /// Live feed of credential-rotation events for this handler's
    /// identity space. The feed ends only at process shutdown; handlers
    /// without a rotation source return an already-closed receiver.
    fn subscribe_rotated_identities(&self) -> mpsc::Receiver<CertificateRotationEvent>;

    /// Health of the underlying credential provider, if this handler has
    /// one to report.
    fn cert_provider_status(&self) -> Option<CertProviderStatus>;
}

/// Resolves a datapath node identifier to an address usable by auth
/// handlers.
pub trait NodeIpResolver: Send + Sync {
    /// Returns `None` when the node is not (yet) known locally, e.g. a
    /// race with node deletion.
    fn node_ip(&self, node_id: NodeId) -> Option<IpAddr>;
}
