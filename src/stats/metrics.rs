//! Delivery counters for the router

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters updated by the router
///
/// Counters are relaxed atomics; they are observability data, not
/// synchronization points. A snapshot taken while traffic is in flight may
/// mix counts from different instants.
#[derive(Debug, Default)]
pub struct RouterStats {
    sends: AtomicU64,
    send_misses: AtomicU64,
    broadcasts: AtomicU64,
    broadcast_targets: AtomicU64,
    delivery_failures: AtomicU64,
}

impl RouterStats {
    /// Create a zeroed counter set
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_send(&self) {
        self.sends.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_send_miss(&self) {
        self.send_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_broadcast(&self, targets: u64) {
        self.broadcasts.fetch_add(1, Ordering::Relaxed);
        self.broadcast_targets.fetch_add(targets, Ordering::Relaxed);
    }

    pub(crate) fn record_delivery_failure(&self) {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> RouterStatsSnapshot {
        RouterStatsSnapshot {
            sends: self.sends.load(Ordering::Relaxed),
            send_misses: self.send_misses.load(Ordering::Relaxed),
            broadcasts: self.broadcasts.load(Ordering::Relaxed),
            broadcast_targets: self.broadcast_targets.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the router counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterStatsSnapshot {
    /// Single-target sends that found a registered connection
    pub sends: u64,
    /// Single-target sends addressed to an unregistered address
    pub send_misses: u64,
    /// Broadcast invocations
    pub broadcasts: u64,
    /// Total targets selected across all broadcasts
    pub broadcast_targets: u64,
    /// Deliveries that returned an error, across sends and broadcasts
    pub delivery_failures: u64,
}
