use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use meshauth_core::{AuthInfo, AuthKey, MapError};

use crate::AuthMap;

/// In-process stand-in for the kernel-shared authentication table.
///
/// Used by the daemon until a kernel-backed table is attached, and by
/// every test that exercises the orchestration flow.
#[derive(Default)]
pub struct InMemoryAuthMap {
    entries: RwLock<HashMap<AuthKey, AuthInfo>>,
}

impl InMemoryAuthMap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthMap for InMemoryAuthMap {
    fn all(&self) -> Result<HashMap<AuthKey, AuthInfo>, MapError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| MapError::Enumerate(e.to_string()))?;
        Ok(entries.clone())
    }

    fn get(&self, key: &AuthKey) -> Result<Option<AuthInfo>, MapError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| MapError::Read(e.to_string()))?;
        Ok(entries.get(key).copied())
    }

    fn update(&self, key: AuthKey, info: AuthInfo) -> Result<(), MapError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| MapError::Write(e.to_string()))?;
        entries.insert(key, info);
        debug!(key = %key, expiration = %info.expiration, "Auth map entry updated");
        Ok(())
    }

    fn delete(&self, key: &AuthKey) -> Result<(), MapError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| MapError::Delete(e.to_string()))?;
        if entries.remove(key).is_none() {
            return Err(MapError::Delete(format!("no entry for key {key}")));
        }
        debug!(key = %key, "Auth map entry deleted");
        Ok(())
    }
}
