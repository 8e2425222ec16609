//! Crate error types
//!
//! Store construction is the only fallible surface in this crate: lookup
//! misses and per-target dispatch failures are handled in place (see the
//! router module) and never surface as errors.

/// Error type for registry construction
#[derive(Debug, Clone)]
pub enum Error {
    /// A backend tag that is not one of the supported backends
    UnknownBackend(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownBackend(tag) => {
                write!(f, "Unknown store backend: {} (expected \"map\" or \"ttl-cache\")", tag)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Convenience result alias for fallible registry operations
pub type Result<T> = std::result::Result<T, Error>;
