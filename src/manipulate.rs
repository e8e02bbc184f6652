//! # Bulk-manipulation selectors.
//!
//! [`Registry::manipulate_listeners`](crate::Registry::manipulate_listeners)
//! drives both bulk add and bulk remove through one traversal; the shapes it
//! accepts are spelled out here as a tagged union instead of runtime type
//! probing:
//!
//! - [`ManipulationTarget::ByKey`] / [`ManipulationTarget::ByPattern`] — one
//!   identifier, a batch of listeners, processed last-element-first.
//! - [`ManipulationTarget::ByMap`] — per-event batches, each routed to the
//!   singular or plural operation depending on [`ListenerBatch`]. Exactly one
//!   level deep: batch values are listeners, never further maps.

use regex::Regex;

use crate::listener::ListenerInput;

/// One event's worth of listeners inside a [`ManipulationTarget::ByMap`].
pub enum ListenerBatch<A, R = bool> {
    /// Routed to the singular add/remove operation.
    One(ListenerInput<A, R>),
    /// Routed to the plural operation (processed last-element-first).
    Many(Vec<ListenerInput<A, R>>),
}

/// Input shape for bulk add/remove.
///
/// # Example
/// ```
/// use eventry::{Listener, ListenerBatch, ManipulationTarget, Registry};
///
/// let registry: Registry<()> = Registry::new();
/// let on_open: Listener<()> = Listener::new(|_| false);
/// let on_close: Listener<()> = Listener::new(|_| false);
///
/// registry.manipulate_listeners(
///     false, // add
///     ManipulationTarget::ByMap(vec![
///         ("open".into(), ListenerBatch::One(on_open.into())),
///         ("close".into(), ListenerBatch::Many(vec![on_close.into()])),
///     ]),
/// );
/// ```
pub enum ManipulationTarget<A, R = bool> {
    /// One exact event key and a batch of listeners.
    ByKey {
        /// Exact event name.
        event: String,
        /// Listeners to add or remove, processed last-element-first.
        listeners: Vec<ListenerInput<A, R>>,
    },
    /// A regex over existing event keys and a batch of listeners.
    ByPattern {
        /// Regex matched against every existing event name.
        pattern: Regex,
        /// Listeners to add or remove, processed last-element-first.
        listeners: Vec<ListenerInput<A, R>>,
    },
    /// Per-event batches keyed by exact event name.
    ByMap(Vec<(String, ListenerBatch<A, R>)>),
}
