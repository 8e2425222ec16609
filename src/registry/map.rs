//! Unbounded concurrent map backend
//!
//! The simplest store: a `HashMap` behind an async `RwLock`. Entries live
//! until they are explicitly removed or replaced, so the only eviction
//! causes this backend reports are `Replaced` and `Explicit`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::address::{Address, Pattern};
use crate::connection::Connection;
use crate::registry::evict::{EvictionCause, EvictionListener};
use crate::registry::store::ConnectionStore;

/// Plain concurrent map with no time or size bound
pub struct MapStore {
    entries: RwLock<HashMap<Address, Connection>>,
    on_evict: Option<EvictionListener>,
}

impl MapStore {
    /// Create an empty store without an eviction listener
    pub fn new() -> Self {
        Self::with_listener(None)
    }

    /// Create an empty store with an optional eviction listener
    pub fn with_listener(on_evict: Option<EvictionListener>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            on_evict,
        }
    }

    /// Invoke the listener outside of any lock
    fn notify(&self, address: &Address, connection: &Connection, cause: EvictionCause) {
        if let Some(listener) = &self.on_evict {
            listener(address, connection, cause);
        }
    }
}

impl Default for MapStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionStore for MapStore {
    async fn put(&self, address: Address, connection: Connection) {
        let previous = {
            let mut entries = self.entries.write().await;
            entries.insert(address.clone(), connection)
        };

        if let Some(previous) = previous {
            debug!(address = %address, "Replaced registered connection");
            self.notify(&address, &previous, EvictionCause::Replaced);
        } else {
            debug!(address = %address, "Registered connection");
        }
    }

    async fn get(&self, address: &Address) -> Option<Connection> {
        let entries = self.entries.read().await;
        entries.get(address).cloned()
    }

    async fn remove(&self, address: &Address) {
        let removed = {
            let mut entries = self.entries.write().await;
            entries.remove(address)
        };

        if let Some(removed) = removed {
            debug!(address = %address, "Removed registered connection");
            self.notify(address, &removed, EvictionCause::Explicit);
        }
    }

    async fn list(&self, pattern: Option<&Pattern>) -> Vec<Address> {
        let entries = self.entries.read().await;
        match pattern {
            Some(pattern) => entries
                .keys()
                .filter(|address| pattern.matches(address))
                .cloned()
                .collect(),
            None => entries.keys().cloned().collect(),
        }
    }

    async fn find_by_connection(&self, connection: &Connection) -> Option<Address> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .find(|(_, stored)| stored.same(connection))
            .map(|(address, _)| address.clone())
    }

    async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }
}
