//! Connection lifecycle management
//!
//! Ties registry membership to connection lifetimes: registration on first
//! sight, injection on reuse, removal on close. Application handlers never
//! touch the store directly.

pub mod context;
pub mod interceptor;

pub use context::{Event, WorkContext};
pub use interceptor::{Interceptor, ScopeFn, DEFAULT_SCOPE};
