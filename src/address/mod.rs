//! Addressing and pattern matching
//!
//! An [`Address`] is the two-level key `(scope, (category, id))` under which
//! a connection is registered. A [`Pattern`] has the same shape but may hold
//! a wildcard in any position, and is used for bulk selection during listing
//! and broadcast.

pub mod key;
pub mod pattern;

pub use key::{Address, Channel};
pub use pattern::{ChannelPattern, Part, Pattern};
