use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use meshauth_authmap::AuthMap;
use meshauth_core::{
    AuthError, AuthHandler, AuthInfo, AuthKey, AuthRequest, AuthType, CertProviderStatus,
    CertificateRotationEvent, NodeIpResolver,
};
use meshauth_signal::SignalAuthKey;

use crate::pending::PendingTable;

/// Orchestrates mutual authentication between workload identity pairs.
///
/// Consumes "authentication required" signals from the datapath and
/// credential-rotation events from handlers, drives the registered
/// [`AuthHandler`] for each key, and writes results into the shared auth
/// map. At most one authentication attempt is in flight per key at any
/// time.
pub struct AuthManager {
    handlers: BTreeMap<AuthType, Arc<dyn AuthHandler>>,
    authmap: Arc<dyn AuthMap>,
    node_resolver: Arc<dyn NodeIpResolver>,
    signal_backoff: Duration,
    pending: PendingTable,
}

impl AuthManager {
    /// Build a manager from the registered handlers.
    ///
    /// Fails when two handlers declare the same auth type; the manager is
    /// never constructed in an inconsistent state.
    pub fn new(
        handlers: Vec<Arc<dyn AuthHandler>>,
        authmap: Arc<dyn AuthMap>,
        node_resolver: Arc<dyn NodeIpResolver>,
        signal_backoff: Duration,
    ) -> Result<Arc<Self>, AuthError> {
        let mut registry: BTreeMap<AuthType, Arc<dyn AuthHandler>> = BTreeMap::new();
        for handler in handlers {
            let auth_type = handler.auth_type();
            if registry.insert(auth_type, handler).is_some() {
                return Err(AuthError::DuplicateHandler(auth_type));
            }
        }

        Ok(Arc::new(Self {
            handlers: registry,
            authmap,
            node_resolver,
            signal_backoff,
            pending: PendingTable::new(),
        }))
    }

    /// Handle one "authentication required" signal from the datapath.
    ///
    /// Reserved identities never authenticate; such signals are a no-op,
    /// not an error.
    pub fn handle_auth_request(self: &Arc<Self>, signal: SignalAuthKey) {
        let key = AuthKey::from(signal);

        if key.local.is_reserved() || key.remote.is_reserved() {
            info!(key = %key, "Reserved identity, skipping authentication");
            return;
        }

        debug!(key = %key, "Handle authentication request");
        self.dispatch(key, false);
    }

    /// Sweep the auth map in response to a credential-rotation event.
    ///
    /// Entries for a deleted identity are removed; entries for a rotated
    /// identity are re-authenticated, bypassing the signal backoff. The
    /// sweep is best-effort, not a transaction: entries already handled
    /// stay handled when a later store operation fails.
    pub fn handle_cert_rotation_event(
        self: &Arc<Self>,
        event: &CertificateRotationEvent,
    ) -> Result<(), AuthError> {
        debug!(identity = %event.identity, deleted = event.deleted, "Handle certificate rotation event");

        let all = self.authmap.all()?;

        for key in all.keys() {
            if key.local == event.identity || key.remote == event.identity {
                if event.deleted {
                    debug!(key = %key, "Certificate delete event: deleting auth map entry");
                    self.authmap.delete(key)?;
                } else {
                    self.dispatch(*key, true);
                }
            }
        }

        Ok(())
    }

    /// Aggregate status of the registered credential providers.
    ///
    /// At most one provider is expected in the current design; the first
    /// reported status (in auth-type order) wins and "disabled" is
    /// returned when none reports one.
    pub fn cert_provider_status(&self) -> CertProviderStatus {
        for handler in self.handlers.values() {
            if let Some(status) = handler.cert_provider_status() {
                return status;
            }
        }

        CertProviderStatus::disabled()
    }

    /// Pending-table introspection for the daemon and tests.
    pub fn pending(&self) -> &PendingTable {
        &self.pending
    }

    /// Deduplicated dispatch shared by signal and rotation intake.
    ///
    /// Returns the handle of the spawned attempt, or `None` when the key
    /// is already in flight and this trigger is dropped. A dropped
    /// trigger is not queued: the in-flight attempt's eventual cache
    /// write is the only effect.
    pub(crate) fn dispatch(
        self: &Arc<Self>,
        key: AuthKey,
        force_reauth: bool,
    ) -> Option<JoinHandle<()>> {
        let Some(guard) = self.pending.try_acquire(key) else {
            debug!(key = %key, "Pending authentication, skipping authentication");
            return None;
        };

        let manager = Arc::clone(self);
        Some(tokio::spawn(async move {
            // The guard travels with the task; dropping it on any exit
            // path below clears the pending marker exactly once.
            let _guard = guard;

            if !force_reauth && manager.within_backoff(&key) {
                return;
            }

            if let Err(err) = manager.authenticate(&key).await {
                warn!(key = %key, error = %err, "Failed to authenticate request");
            }
        }))
    }

    /// Whether a fresh, unexpired cache entry makes this trigger
    /// redundant.
    ///
    /// The datapath may re-raise a signal for a key that was just
    /// written. Within the backoff window the existing entry is trusted;
    /// past it the key authenticates again even if unexpired, so updates
    /// from an external source are picked up. A rate limit, never a
    /// correctness gate.
    fn within_backoff(&self, key: &AuthKey) -> bool {
        let info = match self.authmap.get(key) {
            Ok(Some(info)) => info,
            Ok(None) => return false,
            Err(err) => {
                debug!(key = %key, error = %err, "Auth map lookup failed, proceeding with authentication");
                return false;
            }
        };

        let now = Utc::now();
        if info.expiration > now && now < info.stored_at + self.signal_backoff {
            debug!(
                key = %key,
                stored_at = %info.stored_at,
                backoff = %self.signal_backoff,
                "Already authenticated in the past, skipping authentication"
            );
            return true;
        }

        false
    }

    async fn authenticate(&self, key: &AuthKey) -> Result<(), AuthError> {
        debug!(key = %key, "Policy is requiring authentication");

        let handler = self
            .handlers
            .get(&key.auth_type)
            .ok_or(AuthError::UnknownAuthType(key.auth_type))?;

        let node_ip = self
            .node_resolver
            .node_ip(key.remote_node_id)
            .ok_or(AuthError::NodeIpUnavailable(key.remote_node_id))?;

        let request = AuthRequest {
            local: key.local,
            remote: key.remote,
            remote_node_ip: node_ip,
        };

        let response = handler.authenticate(&request).await?;

        let info = AuthInfo {
            expiration: response.expiration,
            stored_at: Utc::now(),
        };
        self.authmap.update(*key, info)?;

        debug!(key = %key, remote_node_ip = %node_ip, "Successfully authenticated");

        Ok(())
    }
}
