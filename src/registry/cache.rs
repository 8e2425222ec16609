//! Capacity- and time-bounded cache backend
//!
//! Entries carry their creation and last-access instants; expiry is decided
//! lazily on reads and eagerly by a background sweep task. Capacity pressure
//! evicts in least-recently-used order. The sweep task holds only a weak
//! handle, so dropping the store stops the sweeper on its next tick.

use std::num::NonZeroUsize;
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::address::{Address, Pattern};
use crate::connection::Connection;
use crate::registry::config::{ExpiryMode, RegistryConfig};
use crate::registry::evict::{EvictionCause, EvictionListener};
use crate::registry::store::ConnectionStore;

struct CacheEntry {
    connection: Connection,
    created_at: Instant,
    last_access: Instant,
}

impl CacheEntry {
    fn new(connection: Connection, now: Instant) -> Self {
        Self {
            connection,
            created_at: now,
            last_access: now,
        }
    }

    fn is_expired(&self, ttl: Duration, mode: ExpiryMode, now: Instant) -> bool {
        let deadline = match mode {
            ExpiryMode::Sliding => self.last_access + ttl,
            ExpiryMode::Fixed => self.created_at + ttl,
        };
        deadline <= now
    }
}

/// Bounded store with time-to-live expiry
pub struct TtlStore {
    entries: Mutex<LruCache<Address, CacheEntry>>,
    ttl: Duration,
    expiry_mode: ExpiryMode,
    on_evict: Option<EvictionListener>,
}

impl TtlStore {
    /// Construct the store and start its expiry sweeper
    pub fn build(config: &RegistryConfig) -> Arc<dyn ConnectionStore> {
        let store = Arc::new(Self::with_config(config));
        Self::spawn_sweeper(Arc::downgrade(&store), config.sweep_interval);
        store
    }

    fn with_config(config: &RegistryConfig) -> Self {
        let entries = match NonZeroUsize::new(config.capacity) {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };

        Self {
            entries: Mutex::new(entries),
            ttl: config.ttl,
            expiry_mode: config.expiry_mode,
            on_evict: config.on_evict.clone(),
        }
    }

    fn spawn_sweeper(store: Weak<TtlStore>, interval: Duration) {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // first tick completes immediately

            loop {
                ticker.tick().await;
                match store.upgrade() {
                    Some(store) => store.sweep().await,
                    None => break,
                }
            }

            debug!("Registry sweeper stopped");
        });
    }

    /// Remove every expired entry and report each as `Expired`
    async fn sweep(&self) {
        let now = Instant::now();
        let removed = {
            let mut entries = self.entries.lock().await;
            let expired: Vec<Address> = entries
                .iter()
                .filter(|(_, entry)| entry.is_expired(self.ttl, self.expiry_mode, now))
                .map(|(address, _)| address.clone())
                .collect();

            expired
                .into_iter()
                .filter_map(|address| entries.pop(&address).map(|entry| (address, entry)))
                .collect::<Vec<_>>()
        };

        if !removed.is_empty() {
            debug!(count = removed.len(), "Swept expired registry entries");
        }
        for (address, entry) in removed {
            self.notify(&address, &entry.connection, EvictionCause::Expired);
        }
    }

    /// Invoke the listener outside of any lock
    fn notify(&self, address: &Address, connection: &Connection, cause: EvictionCause) {
        if let Some(listener) = &self.on_evict {
            listener(address, connection, cause);
        }
    }
}

#[async_trait]
impl ConnectionStore for TtlStore {
    async fn put(&self, address: Address, connection: Connection) {
        let now = Instant::now();
        let displaced = {
            let mut entries = self.entries.lock().await;
            entries.push(address.clone(), CacheEntry::new(connection, now))
        };

        match displaced {
            Some((old_address, old_entry)) if old_address == address => {
                debug!(address = %address, "Replaced registered connection");
                self.notify(&old_address, &old_entry.connection, EvictionCause::Replaced);
            }
            Some((old_address, old_entry)) => {
                debug!(address = %old_address, "Evicted connection under capacity pressure");
                self.notify(&old_address, &old_entry.connection, EvictionCause::Size);
            }
            None => {
                debug!(address = %address, "Registered connection");
            }
        }
    }

    async fn get(&self, address: &Address) -> Option<Connection> {
        let now = Instant::now();
        let mut live = None;
        let mut dead = false;

        let expired = {
            let mut entries = self.entries.lock().await;
            if let Some(entry) = entries.get_mut(address) {
                if entry.is_expired(self.ttl, self.expiry_mode, now) {
                    dead = true;
                } else {
                    if self.expiry_mode == ExpiryMode::Sliding {
                        entry.last_access = now;
                    }
                    live = Some(entry.connection.clone());
                }
            }
            if dead {
                entries.pop(address)
            } else {
                None
            }
        };

        if let Some(entry) = expired {
            debug!(address = %address, "Expired entry reclaimed on read");
            self.notify(address, &entry.connection, EvictionCause::Expired);
        }
        live
    }

    async fn remove(&self, address: &Address) {
        let removed = {
            let mut entries = self.entries.lock().await;
            entries.pop(address)
        };

        if let Some(entry) = removed {
            debug!(address = %address, "Removed registered connection");
            self.notify(address, &entry.connection, EvictionCause::Explicit);
        }
    }

    async fn list(&self, pattern: Option<&Pattern>) -> Vec<Address> {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(self.ttl, self.expiry_mode, now))
            .filter(|(address, _)| pattern.map_or(true, |pattern| pattern.matches(address)))
            .map(|(address, _)| address.clone())
            .collect()
    }

    async fn find_by_connection(&self, connection: &Connection) -> Option<Address> {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(self.ttl, self.expiry_mode, now))
            .find(|(_, entry)| entry.connection.same(connection))
            .map(|(address, _)| address.clone())
    }

    async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(self.ttl, self.expiry_mode, now))
            .count()
    }
}

impl Drop for TtlStore {
    /// Drain whatever is left and report it as `Collected`
    fn drop(&mut self) {
        let entries = self.entries.get_mut();
        let mut drained = Vec::with_capacity(entries.len());
        while let Some((address, entry)) = entries.pop_lru() {
            drained.push((address, entry));
        }

        for (address, entry) in drained {
            self.notify(&address, &entry.connection, EvictionCause::Collected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::config::BackendType;
    use std::sync::Mutex as StdMutex;

    type EventLog = Arc<StdMutex<Vec<(Address, EvictionCause)>>>;

    fn recording_config() -> (RegistryConfig, EventLog) {
        let events: EventLog = Arc::new(StdMutex::new(Vec::new()));
        let sink = events.clone();
        let config = RegistryConfig::default()
            .backend(BackendType::TtlCache)
            .ttl(Duration::from_millis(100))
            .sweep_interval(Duration::from_millis(10))
            .on_evict(move |addr: &Address, _: &Connection, cause| {
                sink.lock().unwrap().push((addr.clone(), cause));
            });
        (config, events)
    }

    fn lobby() -> Address {
        Address::from_parts("s1", "room", "lobby")
    }

    #[tokio::test(start_paused = true)]
    async fn test_sliding_expiry_resets_on_access() {
        let (config, events) = recording_config();
        let store = TtlStore::build(&config.sweep_interval(Duration::from_secs(3600)));

        store.put(lobby(), Connection::new(1u8)).await;

        tokio::time::advance(Duration::from_millis(60)).await;
        assert!(store.get(&lobby()).await.is_some()); // refreshes the countdown

        tokio::time::advance(Duration::from_millis(60)).await;
        assert!(store.get(&lobby()).await.is_some()); // 120ms since put, 60ms since access

        tokio::time::advance(Duration::from_millis(150)).await;
        assert!(store.get(&lobby()).await.is_none());

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], (lobby(), EvictionCause::Expired));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_expiry_ignores_access() {
        let (config, _) = recording_config();
        let store = TtlStore::build(
            &config
                .expiry_mode(ExpiryMode::Fixed)
                .sweep_interval(Duration::from_secs(3600)),
        );

        store.put(lobby(), Connection::new(1u8)).await;

        tokio::time::advance(Duration::from_millis(60)).await;
        assert!(store.get(&lobby()).await.is_some());

        tokio::time::advance(Duration::from_millis(60)).await;
        // 120ms after creation; the read at 60ms did not extend the lifetime.
        assert!(store.get(&lobby()).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_restarts_fixed_countdown() {
        let (config, events) = recording_config();
        let store = TtlStore::build(
            &config
                .expiry_mode(ExpiryMode::Fixed)
                .sweep_interval(Duration::from_secs(3600)),
        );

        store.put(lobby(), Connection::new(1u8)).await;
        tokio::time::advance(Duration::from_millis(80)).await;
        store.put(lobby(), Connection::new(2u8)).await;

        tokio::time::advance(Duration::from_millis(80)).await;
        // 160ms after the first put, 80ms after the replacing one.
        assert!(store.get(&lobby()).await.is_some());

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], (lobby(), EvictionCause::Replaced));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_reclaims_idle_entries() {
        let (config, events) = recording_config();
        let store = TtlStore::build(&config);

        store.put(lobby(), Connection::new(1u8)).await;
        store
            .put(
                Address::from_parts("s1", "room", "games"),
                Connection::new(2u8),
            )
            .await;

        tokio::time::advance(Duration::from_millis(150)).await;
        tokio::time::sleep(Duration::from_millis(20)).await; // let the sweeper tick

        assert_eq!(store.len().await, 0);
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|(_, cause)| *cause == EvictionCause::Expired));
    }

    #[tokio::test(start_paused = true)]
    async fn test_capacity_evicts_least_recently_used() {
        let (config, events) = recording_config();
        let store = TtlStore::build(
            &config
                .capacity(2)
                .sweep_interval(Duration::from_secs(3600)),
        );

        let a = Address::from_parts("s1", "user", "a");
        let b = Address::from_parts("s1", "user", "b");
        let c = Address::from_parts("s1", "user", "c");

        store.put(a.clone(), Connection::new(1u8)).await;
        store.put(b.clone(), Connection::new(2u8)).await;
        assert!(store.get(&a).await.is_some()); // promote a over b
        store.put(c.clone(), Connection::new(3u8)).await;

        assert_eq!(store.len().await, 2);
        assert!(store.get(&a).await.is_some());
        assert!(store.get(&b).await.is_none());
        assert!(store.get(&c).await.is_some());

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], (b.clone(), EvictionCause::Size));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bulk_reads_skip_expired_without_evicting() {
        let (config, events) = recording_config();
        let store = TtlStore::build(&config.sweep_interval(Duration::from_secs(3600)));

        store.put(lobby(), Connection::new(1u8)).await;
        tokio::time::advance(Duration::from_millis(150)).await;

        assert!(store.list(None).await.is_empty());
        assert_eq!(store.len().await, 0);
        assert!(store
            .find_by_connection(&Connection::new(1u8))
            .await
            .is_none());

        // Nothing was removed yet, so no eviction event has fired.
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_collects_remaining_entries() {
        let (config, events) = recording_config();
        let store = TtlStore::build(&config);

        store.put(lobby(), Connection::new(1u8)).await;
        store
            .put(
                Address::from_parts("s1", "room", "games"),
                Connection::new(2u8),
            )
            .await;

        drop(store);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|(_, cause)| *cause == EvictionCause::Collected));
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_remove_fires_once() {
        let (config, events) = recording_config();
        let store = TtlStore::build(&config.sweep_interval(Duration::from_secs(3600)));

        store.put(lobby(), Connection::new(1u8)).await;
        store.remove(&lobby()).await;
        store.remove(&lobby()).await;

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], (lobby(), EvictionCause::Explicit));
    }
}
