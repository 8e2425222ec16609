//! Eviction causes and notification
//!
//! Every removal of a registry entry is classified by a cause. The map
//! backend only ever reports `Explicit` and `Replaced`; the TTL cache
//! backend reports all five.

use std::sync::Arc;

use crate::address::Address;
use crate::connection::Connection;

/// Why a registry entry was removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionCause {
    /// Caller-initiated removal
    Explicit,
    /// Time-based expiry (cache backend only)
    Expired,
    /// Overwritten by a `put` under the same address
    Replaced,
    /// Capacity pressure (cache backend only)
    Size,
    /// Reclaimed during backend teardown (cache backend only)
    Collected,
}

impl EvictionCause {
    /// Stable lowercase tag, used for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionCause::Explicit => "explicit",
            EvictionCause::Expired => "expired",
            EvictionCause::Replaced => "replaced",
            EvictionCause::Size => "size",
            EvictionCause::Collected => "collected",
        }
    }
}

impl std::fmt::Display for EvictionCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked after an entry leaves the store
///
/// The cache backend's sweeper may invoke this concurrently with application
/// tasks. Listeners run after the store's internal lock is released, so a
/// listener may call back into the store; it must still account for the fact
/// that the entry it was notified about is already gone.
pub type EvictionListener = Arc<dyn Fn(&Address, &Connection, EvictionCause) + Send + Sync>;
