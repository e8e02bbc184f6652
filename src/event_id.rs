//! # Event identifiers: exact keys and pattern selectors.
//!
//! An [`EventId`] addresses one or more listener lists in the registry:
//!
//! - [`EventId::Key`] names exactly one event. Looking it up materializes the
//!   key with an empty list if it does not exist yet, which is how an event
//!   can be "defined" before any listener is attached.
//! - [`EventId::Pattern`] selects every **existing** key whose name matches a
//!   regex. A pattern is purely a multi-key selector: it never creates an
//!   entry, and keys that have not been defined or populated are invisible to
//!   it even when their names would match.

use std::fmt;

use regex::Regex;

use crate::error::RegistryError;

/// Addresses one or more listener lists: an exact key or a regex selector
/// over existing keys.
#[derive(Clone, Debug)]
pub enum EventId {
    /// Exact event name.
    Key(String),
    /// Regex matched against every existing event name.
    Pattern(Regex),
}

impl EventId {
    /// Creates an exact-key identifier.
    pub fn key(name: impl Into<String>) -> Self {
        EventId::Key(name.into())
    }

    /// Compiles a pattern identifier from a regex source.
    ///
    /// # Errors
    /// Returns [`RegistryError::InvalidPattern`] if the source does not
    /// compile.
    ///
    /// # Example
    /// ```
    /// use eventry::EventId;
    ///
    /// assert!(EventId::pattern("^task/").is_ok());
    /// assert!(EventId::pattern("(").is_err());
    /// ```
    pub fn pattern(source: &str) -> Result<Self, RegistryError> {
        Ok(EventId::Pattern(Regex::new(source)?))
    }

    /// Returns true for the pattern variant.
    pub fn is_pattern(&self) -> bool {
        matches!(self, EventId::Pattern(_))
    }
}

impl From<&str> for EventId {
    fn from(name: &str) -> Self {
        EventId::key(name)
    }
}

impl From<String> for EventId {
    fn from(name: String) -> Self {
        EventId::Key(name)
    }
}

impl From<Regex> for EventId {
    fn from(pattern: Regex) -> Self {
        EventId::Pattern(pattern)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Key(name) => f.write_str(name),
            EventId::Pattern(pattern) => write!(f, "/{}/", pattern.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_str() {
        let id = EventId::from("startup");
        assert!(!id.is_pattern());
        assert_eq!(id.to_string(), "startup");
    }

    #[test]
    fn test_pattern_compiles() {
        let id = EventId::pattern("^ba").unwrap();
        assert!(id.is_pattern());
        assert_eq!(id.to_string(), "/^ba/");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = EventId::pattern("[unclosed").unwrap_err();
        assert_eq!(err.as_label(), "invalid_pattern");
    }
}
