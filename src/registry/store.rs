//! Store contract and backend factory
//!
//! Both backends implement the same contract, so callers (the router, the
//! lifecycle interceptor) are backend-agnostic. The backend set is closed:
//! only the two variants exist, selected at construction time.

use std::sync::Arc;

use async_trait::async_trait;

use crate::address::{Address, Pattern};
use crate::connection::Connection;
use crate::registry::cache::TtlStore;
use crate::registry::config::{BackendType, RegistryConfig};
use crate::registry::map::MapStore;

/// Common contract for connection registries
///
/// All operations are safe to call concurrently from independent tasks with
/// no external synchronization. Per-address updates are linearizable: a `put`
/// followed by a `get` on the same address observes the most recent completed
/// write. Across different addresses there is no ordering guarantee.
#[async_trait]
pub trait ConnectionStore: Send + Sync {
    /// Unconditional upsert; storing under an existing address replaces the
    /// prior connection (a replace event, not two lifecycle events)
    async fn put(&self, address: Address, connection: Connection);

    /// Look up the connection registered under an address
    async fn get(&self, address: &Address) -> Option<Connection>;

    /// Idempotent removal; an absent key is a no-op, not an error
    async fn remove(&self, address: &Address);

    /// All stored addresses, or only those matching a pattern
    ///
    /// Order is not significant and the result contains no duplicates.
    async fn list(&self, pattern: Option<&Pattern>) -> Vec<Address>;

    /// Reverse lookup by handle identity
    ///
    /// O(n) scan over the live entries; used by the lifecycle interceptor
    /// for close events that no longer carry an address. Close events are
    /// infrequent relative to steady-state traffic, so the scan beats
    /// maintaining a second reverse index.
    async fn find_by_connection(&self, connection: &Connection) -> Option<Address>;

    /// Number of live entries
    async fn len(&self) -> usize;
}

/// Construct a store from configuration
///
/// The backend set is closed, so selection is a plain switch. An unsupported
/// backend tag is rejected earlier, when the tag is parsed into
/// [`BackendType`].
pub fn from_config(config: &RegistryConfig) -> Arc<dyn ConnectionStore> {
    match config.backend {
        BackendType::Map => Arc::new(MapStore::with_listener(config.on_evict.clone())),
        BackendType::TtlCache => TtlStore::build(config),
    }
}
