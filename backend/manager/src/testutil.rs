//! Shared fakes for the manager and service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::{mpsc, Semaphore};

use meshauth_core::{
    AuthError, AuthHandler, AuthKey, AuthRequest, AuthResponse, AuthType, CertProviderStatus,
    CertificateRotationEvent, Identity, MapError, NodeId, NodeIpResolver,
};

use crate::manager::AuthManager;

pub(crate) fn test_key(local: u32, remote: u32) -> AuthKey {
    AuthKey {
        local: Identity(local),
        remote: Identity(remote),
        remote_node_id: NodeId(1),
        auth_type: AuthType::MutualTls,
    }
}

/// Wait until no authentication task is in flight any more.
pub(crate) async fn settled(manager: &AuthManager) {
    tokio::time::timeout(StdDuration::from_secs(2), async {
        while !manager.pending().is_empty() {
            tokio::time::sleep(StdDuration::from_millis(5)).await;
        }
    })
    .await
    .expect("pending authentications did not settle");
}

/// Handler that counts authenticate calls and answers with a fixed TTL.
///
/// An optional gate semaphore lets a test hold the attempt in flight.
pub(crate) struct CountingHandler {
    auth_type: AuthType,
    ttl: Duration,
    calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
    status: Option<CertProviderStatus>,
}

impl CountingHandler {
    pub(crate) fn new(auth_type: AuthType, ttl: Duration) -> Self {
        Self {
            auth_type,
            ttl,
            calls: AtomicUsize::new(0),
            gate: None,
            status: None,
        }
    }

    pub(crate) fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn with_status(mut self, status: CertProviderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthHandler for CountingHandler {
    async fn authenticate(&self, _request: &AuthRequest) -> Result<AuthResponse, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.map_err(|e| AuthError::Handler {
                auth_type: self.auth_type,
                message: e.to_string(),
            })?;
            permit.forget();
        }

        Ok(AuthResponse {
            expiration: Utc::now() + self.ttl,
        })
    }

    fn auth_type(&self) -> AuthType {
        self.auth_type
    }

    fn subscribe_rotated_identities(&self) -> mpsc::Receiver<CertificateRotationEvent> {
        // Tests drive rotation through their own channels; the fake has
        // no feed of its own.
        let (_tx, rx) = mpsc::channel(1);
        rx
    }

    fn cert_provider_status(&self) -> Option<CertProviderStatus> {
        self.status.clone()
    }
}

/// Resolves every node to one fixed address.
pub(crate) struct StaticResolver(pub(crate) std::net::IpAddr);

impl NodeIpResolver for StaticResolver {
    fn node_ip(&self, _node_id: NodeId) -> Option<std::net::IpAddr> {
        Some(self.0)
    }
}

/// Resolves no node at all.
pub(crate) struct NoResolver;

impl NodeIpResolver for NoResolver {
    fn node_ip(&self, _node_id: NodeId) -> Option<std::net::IpAddr> {
        None
    }
}

/// Auth map whose every operation fails, for error-propagation tests.
pub(crate) struct BrokenAuthMap;

impl meshauth_authmap::AuthMap for BrokenAuthMap {
    fn all(&self) -> Result<std::collections::HashMap<AuthKey, meshauth_core::AuthInfo>, MapError> {
        Err(MapError::Enumerate("table unavailable".into()))
    }

    fn get(&self, _key: &AuthKey) -> Result<Option<meshauth_core::AuthInfo>, MapError> {
        Err(MapError::Read("table unavailable".into()))
    }

    fn update(&self, _key: AuthKey, _info: meshauth_core::AuthInfo) -> Result<(), MapError> {
        Err(MapError::Write("table unavailable".into()))
    }

    fn delete(&self, _key: &AuthKey) -> Result<(), MapError> {
        Err(MapError::Delete("table unavailable".into()))
    }
}
