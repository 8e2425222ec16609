//! Concrete address types
//!
//! This module defines the keys that identify a connection's routing slot.

/// Application-chosen sub-key of an address (e.g., `("room", "lobby")`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Channel {
    /// Category of the channel (e.g., "room")
    pub category: String,
    /// Identifier within the category (e.g., "lobby")
    pub id: String,
}

impl Channel {
    /// Create a new channel key
    pub fn new(category: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            id: id.into(),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.category, self.id)
    }
}

/// Full two-level routing key: scope plus channel
///
/// The scope is chosen by the caller (typically session- or tenant-derived,
/// see the lifecycle module); the channel is chosen by the application.
/// Equality is structural and an address is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    /// Addressing namespace (session/tenant-derived or a constant default)
    pub scope: String,
    /// Application-chosen sub-key
    pub channel: Channel,
}

impl Address {
    /// Create a new address
    pub fn new(scope: impl Into<String>, channel: Channel) -> Self {
        Self {
            scope: scope.into(),
            channel,
        }
    }

    /// Create an address from its three components
    pub fn from_parts(
        scope: impl Into<String>,
        category: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self::new(scope, Channel::new(category, id))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.scope, self.channel)
    }
}
