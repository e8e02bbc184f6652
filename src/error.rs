//! Error types used by the registry.
//!
//! The registry's surface is almost entirely infallible: add/remove/define
//! operations are no-ops on missing targets, and the listener shape is checked
//! by the type system at the public boundary. The one input a caller can still
//! get wrong at runtime is a pattern source that does not compile.
//!
//! Listener faults are **not** represented here: a panicking listener unwinds
//! through [`Registry::emit_event`](crate::Registry::emit_event) to the caller
//! (see the crate-level docs).

use thiserror::Error;

/// # Errors produced by the registry.
///
/// Raised when constructing an [`EventId`](crate::EventId) from an invalid
/// pattern source. No other registry operation fails.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The pattern source could not be compiled into a regex.
    #[error("invalid event pattern: {source}")]
    InvalidPattern {
        /// The underlying compilation error.
        #[from]
        source: regex::Error,
    },
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventry::EventId;
    ///
    /// let err = EventId::pattern("(").unwrap_err();
    /// assert_eq!(err.as_label(), "invalid_pattern");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::InvalidPattern { .. } => "invalid_pattern",
        }
    }
}
