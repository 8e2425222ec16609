//! Keyed connection registry with pattern-matched broadcast
//!
//! `fanout-rs` keeps live connection handles addressable under two-level
//! routing keys and pushes payloads to one connection or to every connection
//! matching a wildcard pattern.
//!
//! # Architecture
//!
//! ```text
//!   framework message path          application push path
//!           │                               │
//!           ▼                               ▼
//!     [Interceptor]                     [Router]
//!      register / reuse /            send_to / broadcast
//!      remove on close                       │
//!           │                               ▼
//!           └────────► [ConnectionStore] ◄──┘
//!                      MapStore | TtlStore
//!                             │
//!                             ▼
//!                     EvictionListener
//! ```
//!
//! The store never inspects connection contents; handles are opaque and
//! compared by identity. Delivery goes through the [`Dispatch`] seam, so the
//! crate works with any transport that can accept a batch of [`bytes::Bytes`]
//! payload units.
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use fanout_rs::{
//!     from_config, Address, Connection, ConnectionStore, Dispatch, DispatchResult, Exclude,
//!     Pattern, RegistryConfig, Router,
//! };
//!
//! struct Push;
//!
//! #[async_trait::async_trait]
//! impl Dispatch for Push {
//!     async fn dispatch(&self, _connection: &Connection, _units: &[Bytes]) -> DispatchResult {
//!         // hand the units to the transport behind the connection
//!         Ok(())
//!     }
//! }
//!
//! # async fn demo() {
//! let store = from_config(&RegistryConfig::default());
//! let router = Router::new(store.clone(), Push);
//!
//! store
//!     .put(Address::from_parts("global", "room", "lobby"), Connection::new(()))
//!     .await;
//! router
//!     .broadcast(&Pattern::any(), &Exclude::none(), &[Bytes::from_static(b"hi")])
//!     .await;
//! # }
//! ```

pub mod address;
pub mod connection;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod router;
pub mod stats;

pub use address::{Address, Channel, ChannelPattern, Part, Pattern};
pub use connection::Connection;
pub use error::{Error, Result};
pub use lifecycle::{Event, Interceptor, ScopeFn, WorkContext, DEFAULT_SCOPE};
pub use registry::{
    from_config, BackendType, ConnectionStore, EvictionCause, EvictionListener, ExpiryMode,
    MapStore, RegistryConfig, TtlStore,
};
pub use router::{Dispatch, DispatchResult, Exclude, Router};
pub use stats::{RouterStats, RouterStatsSnapshot};
