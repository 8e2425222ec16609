//! Address patterns and the wildcard matcher
//!
//! A pattern mirrors the shape of an address but any position may hold a
//! wildcard. The wildcard is an enum variant rather than a sentinel string,
//! so it can never collide with a legal address component.

use super::key::Address;

/// One position of a pattern: wildcard or an exact value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Matches any value in this position
    Any,
    /// Matches only the given value
    Exact(String),
}

impl Part {
    /// Create an exact-match part
    pub fn exact(value: impl Into<String>) -> Self {
        Part::Exact(value.into())
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Part::Any => true,
            Part::Exact(expected) => expected == value,
        }
    }
}

impl std::fmt::Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Part::Any => write!(f, "*"),
            Part::Exact(value) => write!(f, "{}", value),
        }
    }
}

/// Inner position of a pattern: the channel may be wildcarded as a whole
/// or matched component-wise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelPattern {
    /// Matches any channel regardless of its components
    Any,
    /// Matches category and id independently
    Parts {
        /// Category position
        category: Part,
        /// Id position
        id: Part,
    },
}

impl ChannelPattern {
    /// Create a component-wise channel pattern
    pub fn parts(category: Part, id: Part) -> Self {
        ChannelPattern::Parts { category, id }
    }
}

impl std::fmt::Display for ChannelPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelPattern::Any => write!(f, "*"),
            ChannelPattern::Parts { category, id } => write!(f, "{}/{}", category, id),
        }
    }
}

/// Address template with wildcard positions, used for bulk selection
///
/// A pattern with no wildcards behaves as an exact address. `matches` is the
/// single source of truth for both store listing and broadcast exclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Scope position
    pub scope: Part,
    /// Channel position
    pub channel: ChannelPattern,
}

impl Pattern {
    /// Create a pattern from its positions
    pub fn new(scope: Part, channel: ChannelPattern) -> Self {
        Self { scope, channel }
    }

    /// Pattern matching every address
    pub fn any() -> Self {
        Self::new(Part::Any, ChannelPattern::Any)
    }

    /// Pattern matching exactly one address (no wildcards)
    pub fn exact(address: &Address) -> Self {
        Self::new(
            Part::exact(address.scope.clone()),
            ChannelPattern::parts(
                Part::exact(address.channel.category.clone()),
                Part::exact(address.channel.id.clone()),
            ),
        )
    }

    /// Decide whether a concrete address matches this pattern
    ///
    /// Position-wise comparison: the scope matches under wildcard-or-equal;
    /// a wildcard channel position short-circuits the whole inner match,
    /// otherwise category and id each match independently. Pure, total, no
    /// partial or prefix matching.
    pub fn matches(&self, address: &Address) -> bool {
        if !self.scope.matches(&address.scope) {
            return false;
        }

        match &self.channel {
            ChannelPattern::Any => true,
            ChannelPattern::Parts { category, id } => {
                category.matches(&address.channel.category) && id.matches(&address.channel.id)
            }
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.scope, self.channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby() -> Address {
        Address::from_parts("s1", "room", "lobby")
    }

    #[test]
    fn test_exact_pattern_matches_only_its_address() {
        let pattern = Pattern::exact(&lobby());

        assert!(pattern.matches(&lobby()));
        assert!(!pattern.matches(&Address::from_parts("s2", "room", "lobby")));
        assert!(!pattern.matches(&Address::from_parts("s1", "user", "lobby")));
        assert!(!pattern.matches(&Address::from_parts("s1", "room", "games")));
    }

    #[test]
    fn test_any_pattern_matches_everything() {
        let pattern = Pattern::any();

        assert!(pattern.matches(&lobby()));
        assert!(pattern.matches(&Address::from_parts("other", "user", "42")));
    }

    #[test]
    fn test_wildcard_subsets_of_an_address_match_it() {
        // Every pattern derived from the address by wildcarding a subset of
        // positions must match the address itself.
        let addr = lobby();
        let scopes = [Part::Any, Part::exact("s1")];
        let categories = [Part::Any, Part::exact("room")];
        let ids = [Part::Any, Part::exact("lobby")];

        for scope in &scopes {
            for category in &categories {
                for id in &ids {
                    let pattern = Pattern::new(
                        scope.clone(),
                        ChannelPattern::parts(category.clone(), id.clone()),
                    );
                    assert!(pattern.matches(&addr), "pattern {} must match {}", pattern, addr);
                }
            }
            let whole = Pattern::new(scope.clone(), ChannelPattern::Any);
            assert!(whole.matches(&addr));
        }
    }

    #[test]
    fn test_changed_concrete_position_breaks_match() {
        let pattern = Pattern::new(
            Part::Any,
            ChannelPattern::parts(Part::exact("room"), Part::Any),
        );

        assert!(pattern.matches(&lobby()));
        assert!(!pattern.matches(&Address::from_parts("s1", "user", "lobby")));
    }

    #[test]
    fn test_wildcard_channel_ignores_components() {
        let pattern = Pattern::new(Part::exact("s1"), ChannelPattern::Any);

        assert!(pattern.matches(&lobby()));
        assert!(pattern.matches(&Address::from_parts("s1", "user", "42")));
        assert!(!pattern.matches(&Address::from_parts("s2", "room", "lobby")));
    }

    #[test]
    fn test_display() {
        let pattern = Pattern::new(
            Part::Any,
            ChannelPattern::parts(Part::exact("room"), Part::Any),
        );

        assert_eq!(pattern.to_string(), "*/room/*");
        assert_eq!(Pattern::any().to_string(), "*/*");
    }
}
