//! Registry configuration

use std::str::FromStr;
use std::time::Duration;

use crate::address::Address;
use crate::connection::Connection;
use crate::error::Error;
use crate::registry::evict::{EvictionCause, EvictionListener};

/// Which storage backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Plain concurrent map, no time or size bound
    Map,
    /// Capacity- and time-bounded cache
    TtlCache,
}

impl FromStr for BackendType {
    type Err = Error;

    /// Parse a configuration tag; anything but `map` or `ttl-cache` is a
    /// fatal configuration error.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "map" => Ok(BackendType::Map),
            "ttl-cache" => Ok(BackendType::TtlCache),
            other => Err(Error::UnknownBackend(other.to_string())),
        }
    }
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::Map => write!(f, "map"),
            BackendType::TtlCache => write!(f, "ttl-cache"),
        }
    }
}

/// Expiry discipline for the cache backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryMode {
    /// Countdown resets on every read or write access; an idle entry is
    /// reclaimed after `ttl` of inactivity. Correct for long-lived,
    /// recurrently-active push connections.
    Sliding,
    /// Countdown runs from creation time only; reads never extend it. Gives
    /// a hard upper bound on entry lifetime independent of traffic.
    Fixed,
}

/// Registry configuration options
#[derive(Clone)]
pub struct RegistryConfig {
    /// Storage backend to use
    pub backend: BackendType,

    /// Maximum entry count for the cache backend (0 = unbounded)
    pub capacity: usize,

    /// Time-to-live for the cache backend
    pub ttl: Duration,

    /// Expiry discipline for the cache backend
    pub expiry_mode: ExpiryMode,

    /// How often the cache backend scans for expired entries
    pub sweep_interval: Duration,

    /// Eviction notification callback
    pub on_evict: Option<EvictionListener>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::Map,
            capacity: 0, // Unbounded
            ttl: Duration::from_secs(30 * 60),
            expiry_mode: ExpiryMode::Sliding,
            sweep_interval: Duration::from_secs(5),
            on_evict: None,
        }
    }
}

impl RegistryConfig {
    /// Set the backend type
    pub fn backend(mut self, backend: BackendType) -> Self {
        self.backend = backend;
        self
    }

    /// Set the maximum entry count (0 = unbounded)
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the time-to-live
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the expiry discipline
    pub fn expiry_mode(mut self, mode: ExpiryMode) -> Self {
        self.expiry_mode = mode;
        self
    }

    /// Set the expiry sweep interval
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Install an eviction listener
    pub fn on_evict(
        mut self,
        listener: impl Fn(&Address, &Connection, EvictionCause) + Send + Sync + 'static,
    ) -> Self {
        self.on_evict = Some(std::sync::Arc::new(listener));
        self
    }
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("backend", &self.backend)
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("expiry_mode", &self.expiry_mode)
            .field("sweep_interval", &self.sweep_interval)
            .field("on_evict", &self.on_evict.as_ref().map(|_| "<listener>"))
            .finish()
    }
}
