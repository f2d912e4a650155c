//! Contract and in-memory implementation of the authentication cache
//! shared with the datapath.

pub mod table;

use std::collections::HashMap;

use meshauth_core::{AuthInfo, AuthKey, MapError};

pub use table::InMemoryAuthMap;

/// Keyed store of authentication results consulted by the datapath.
///
/// Every operation can fail: the backing table is a shared kernel
/// resource. No atomicity is promised across calls; a read followed by a
/// delete observes whatever happened in between.
pub trait AuthMap: Send + Sync {
    /// Snapshot of all current entries.
    fn all(&self) -> Result<HashMap<AuthKey, AuthInfo>, MapError>;

    /// Point lookup of one entry.
    fn get(&self, key: &AuthKey) -> Result<Option<AuthInfo>, MapError>;

    /// Insert or overwrite one entry.
    fn update(&self, key: AuthKey, info: AuthInfo) -> Result<(), MapError>;

    /// Remove one entry. Deleting an absent key is an error, mirroring
    /// the kernel table's behavior.
    fn delete(&self, key: &AuthKey) -> Result<(), MapError>;
}
