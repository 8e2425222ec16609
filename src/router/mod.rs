//! Pattern-matched delivery
//!
//! The router is the read side of the registry: it resolves a pattern to the
//! currently registered targets and hands payload batches to the transport.
//!
//! ```text
//!   send_to(addr)            broadcast(pattern, exclude)
//!        │                              │
//!        ▼                              ▼
//!   store.get(addr)         store.list(pattern) ─ minus ─ exclude
//!        │                              │
//!        ▼                              ▼ (per surviving target)
//!   Dispatch::dispatch ◄──── store.get(addr) then dispatch
//! ```
//!
//! Misses and delivery errors are absorbed here; the caller only ever learns
//! how many deliveries were attempted.

pub mod dispatch;
pub mod fanout;

pub use dispatch::{Dispatch, DispatchResult};
pub use fanout::{Exclude, Router};
