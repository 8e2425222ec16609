//! Connection registry
//!
//! The registry stores live connection handles under routing addresses and
//! tells interested parties whenever an entry leaves the store.
//!
//! # Architecture
//!
//! ```text
//!                      Arc<dyn ConnectionStore>
//!                    ┌────────────┴────────────┐
//!                    │                         │
//!              ┌─────▼─────┐            ┌──────▼─────┐
//!              │ MapStore  │            │  TtlStore  │
//!              │ RwLock<   │            │ LruCache + │
//!              │  HashMap> │            │ sweep task │
//!              └─────┬─────┘            └──────┬─────┘
//!                    │                         │
//!                    └──────────┬──────────────┘
//!                               ▼
//!                      EvictionListener
//!                (explicit / expired / replaced /
//!                      size / collected)
//! ```
//!
//! The backend is chosen at construction time from [`RegistryConfig`];
//! callers only ever see the [`ConnectionStore`] contract.

pub mod cache;
pub mod config;
pub mod evict;
pub mod map;
pub mod store;

pub use cache::TtlStore;
pub use config::{BackendType, ExpiryMode, RegistryConfig};
pub use evict::{EvictionCause, EvictionListener};
pub use map::MapStore;
pub use store::{from_config, ConnectionStore};
