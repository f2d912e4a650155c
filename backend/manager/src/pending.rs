use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::debug;

use meshauth_core::AuthKey;

/// Set of auth keys with an authentication attempt currently in flight.
///
/// Owned by one manager instance, never shared globally. The lock is held
/// only for the check-and-insert and the removal, never across the
/// authentication call itself.
#[derive(Clone, Default)]
pub struct PendingTable {
    inner: Arc<Mutex<HashSet<AuthKey>>>,
}

impl PendingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically mark `key` as in flight.
    ///
    /// Returns `None` when another task already owns the key. The guard
    /// releases the key exactly once when dropped, on every exit path of
    /// the owning task.
    pub fn try_acquire(&self, key: AuthKey) -> Option<PendingGuard> {
        let mut pending = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if !pending.insert(key) {
            return None;
        }
        Some(PendingGuard {
            table: Arc::clone(&self.inner),
            key,
        })
    }

    pub fn contains(&self, key: &AuthKey) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Marks one in-flight authentication; dropping it clears the pending
/// entry.
pub struct PendingGuard {
    table: Arc<Mutex<HashSet<AuthKey>>>,
    key: AuthKey,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        debug!(key = %self.key, "Clearing pending authentication");
        self.table
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}
