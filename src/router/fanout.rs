//! Single-target send and pattern-matched broadcast
//!
//! The router reads from the store and writes to the transport. It never
//! mutates the registry; concurrent removals simply shrink the target set
//! between the listing pass and the per-target lookup.

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::address::{Address, Pattern};
use crate::registry::store::ConnectionStore;
use crate::router::dispatch::Dispatch;
use crate::stats::{RouterStats, RouterStatsSnapshot};

/// Targets to leave out of a broadcast
///
/// The exclusion is the union of the explicit address set and, when present,
/// every address the pattern selects at broadcast time.
#[derive(Debug, Clone, Default)]
pub struct Exclude {
    /// Addresses excluded individually
    pub addresses: HashSet<Address>,
    /// Pattern whose matches are excluded as a group
    pub pattern: Option<Pattern>,
}

impl Exclude {
    /// Exclude nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Exclude a single address
    pub fn address(address: Address) -> Self {
        Self::none().and_address(address)
    }

    /// Exclude every address matching a pattern
    pub fn matching(pattern: Pattern) -> Self {
        Self::none().and_matching(pattern)
    }

    /// Add one more excluded address
    pub fn and_address(mut self, address: Address) -> Self {
        self.addresses.insert(address);
        self
    }

    /// Set the exclusion pattern
    pub fn and_matching(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.pattern.is_none()
    }
}

/// Delivery front end over a connection store
pub struct Router<D: Dispatch> {
    store: Arc<dyn ConnectionStore>,
    dispatch: D,
    stats: Arc<RouterStats>,
}

impl<D: Dispatch> Router<D> {
    /// Create a router over a store and a transport
    pub fn new(store: Arc<dyn ConnectionStore>, dispatch: D) -> Self {
        Self {
            store,
            dispatch,
            stats: Arc::new(RouterStats::new()),
        }
    }

    /// Current delivery counters
    pub fn stats(&self) -> RouterStatsSnapshot {
        self.stats.snapshot()
    }

    /// Deliver a payload batch to the connection registered under an address
    ///
    /// A lookup miss drops the batch silently; a delivery error is logged
    /// and swallowed. Neither is an error to the caller.
    pub async fn send_to(&self, address: &Address, units: &[Bytes]) {
        match self.store.get(address).await {
            Some(connection) => {
                self.stats.record_send();
                if let Err(error) = self.dispatch.dispatch(&connection, units).await {
                    self.stats.record_delivery_failure();
                    warn!(address = %address, error = %error, "Delivery failed");
                }
            }
            None => {
                self.stats.record_send_miss();
                debug!(address = %address, "Dropped send to unregistered address");
            }
        }
    }

    /// Deliver a payload batch to every address matching a pattern
    ///
    /// The exclusion pattern is resolved against the store once, up front;
    /// the target set is the main pattern's matches minus the union of the
    /// explicit set and that resolved set. Each surviving target is looked
    /// up again before delivery, so a connection removed mid-broadcast is
    /// skipped rather than dispatched to. A failing target never aborts the
    /// fan-out. Returns the number of deliveries attempted.
    pub async fn broadcast(&self, pattern: &Pattern, exclude: &Exclude, units: &[Bytes]) -> usize {
        let candidates = self.store.list(Some(pattern)).await;
        let pattern_excluded: HashSet<Address> = match &exclude.pattern {
            Some(excluded) => self.store.list(Some(excluded)).await.into_iter().collect(),
            None => HashSet::new(),
        };

        let mut attempted = 0usize;
        for address in candidates {
            if exclude.addresses.contains(&address) || pattern_excluded.contains(&address) {
                continue;
            }

            let connection = match self.store.get(&address).await {
                Some(connection) => connection,
                None => continue, // removed since the listing pass
            };

            attempted += 1;
            if let Err(error) = self.dispatch.dispatch(&connection, units).await {
                self.stats.record_delivery_failure();
                warn!(address = %address, error = %error, "Delivery failed");
            }
        }

        self.stats.record_broadcast(attempted as u64);
        debug!(
            pattern = %pattern,
            targets = attempted,
            excluded = !exclude.is_empty(),
            "Broadcast complete"
        );
        attempted
    }
}
