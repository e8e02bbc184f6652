//! # Listener handles and registration records.
//!
//! This module defines the invocable unit stored in the registry and the
//! shapes it may take at the public boundary:
//!
//! - [`Listener`] — a cheaply cloneable handle over a callback. Identity is
//!   pointer identity: clones of one handle are "the same listener" for
//!   deduplication and removal, while two handles built from identical
//!   closures are not.
//! - [`ListenerRecord`] — a listener plus its `fire_once` flag, the unit
//!   actually kept in an event's list.
//! - [`ListenerInput`] — the boundary union accepted by add operations: a
//!   bare listener or a pre-wrapped record. Normalized to a record
//!   immediately on entry.
//!
//! ## Rules
//! - Keep the `Listener` handle you registered if you intend to remove it
//!   later; removal matches by pointer identity, not by closure contents.
//! - The `fire_once` flag never participates in identity: re-adding the same
//!   listener with a different flag against the same event is a no-op.

use std::fmt;
use std::rc::Rc;

/// Cheaply cloneable handle over a callback of `&[A] -> R`.
///
/// Two handles compare equal iff they share the same underlying allocation
/// (`Rc::ptr_eq`). This is what add-deduplication and remove-by-listener key
/// on.
///
/// # Example
/// ```
/// use eventry::Listener;
///
/// let a: Listener<i32> = Listener::new(|args| args.len() == 2);
/// let b = a.clone();
/// let c: Listener<i32> = Listener::new(|args| args.len() == 2);
///
/// assert_eq!(a, b); // clone of the same handle
/// assert_ne!(a, c); // identical body, distinct listener
/// ```
pub struct Listener<A, R = bool>(Rc<dyn Fn(&[A]) -> R>);

impl<A, R> Listener<A, R> {
    /// Wraps a callback into a listener handle.
    pub fn new(callback: impl Fn(&[A]) -> R + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// Invokes the callback with the given argument slice.
    pub fn call(&self, args: &[A]) -> R {
        (self.0)(args)
    }

    /// Returns true if both handles point at the same underlying callback.
    pub(crate) fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<A, R> Clone for Listener<A, R> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<A, R> PartialEq for Listener<A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<A, R> Eq for Listener<A, R> {}

impl<A, R> fmt::Debug for Listener<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Rc::as_ptr(&self.0))
            .finish()
    }
}

/// A listener plus its registration flags; the unit stored in an event list.
///
/// Immutable once constructed — dispatch only ever adds or removes whole
/// records, never edits one in place.
pub struct ListenerRecord<A, R = bool> {
    /// The invocable unit.
    pub listener: Listener<A, R>,
    /// Remove this record immediately before its first invocation.
    pub fire_once: bool,
}

impl<A, R> ListenerRecord<A, R> {
    /// Creates a record with an explicit `fire_once` flag.
    pub fn new(listener: Listener<A, R>, fire_once: bool) -> Self {
        Self {
            listener,
            fire_once,
        }
    }

    /// Creates a fire-once record.
    pub fn once(listener: Listener<A, R>) -> Self {
        Self::new(listener, true)
    }
}

impl<A, R> Clone for ListenerRecord<A, R> {
    fn clone(&self) -> Self {
        Self {
            listener: self.listener.clone(),
            fire_once: self.fire_once,
        }
    }
}

impl<A, R> fmt::Debug for ListenerRecord<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRecord")
            .field("listener", &self.listener)
            .field("fire_once", &self.fire_once)
            .finish()
    }
}

/// Boundary union accepted by the add operations.
///
/// Constructed implicitly via `From`; callers normally never name this type:
///
/// ```
/// use eventry::{EventId, Listener, ListenerRecord, Registry};
///
/// let registry: Registry<()> = Registry::new();
/// let quiet: Listener<()> = Listener::new(|_| false);
/// registry.add_listener(&EventId::key("tick"), quiet.clone());
/// registry.add_listener(&EventId::key("tock"), ListenerRecord::once(quiet));
/// ```
pub enum ListenerInput<A, R = bool> {
    /// A bare listener; normalized with `fire_once: false`.
    Bare(Listener<A, R>),
    /// A pre-wrapped record; passed through unchanged, flag included.
    Wrapped(ListenerRecord<A, R>),
}

impl<A, R> ListenerInput<A, R> {
    /// Normalizes the input into the stored record shape.
    pub fn into_record(self) -> ListenerRecord<A, R> {
        match self {
            ListenerInput::Bare(listener) => ListenerRecord::new(listener, false),
            ListenerInput::Wrapped(record) => record,
        }
    }
}

impl<A, R> From<Listener<A, R>> for ListenerInput<A, R> {
    fn from(listener: Listener<A, R>) -> Self {
        ListenerInput::Bare(listener)
    }
}

impl<A, R> From<ListenerRecord<A, R>> for ListenerInput<A, R> {
    fn from(record: ListenerRecord<A, R>) -> Self {
        ListenerInput::Wrapped(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_preserves_identity() {
        let a: Listener<i32> = Listener::new(|_| false);
        let b = a.clone();
        assert!(a.same(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_handles_differ() {
        let a: Listener<i32> = Listener::new(|_| false);
        let b: Listener<i32> = Listener::new(|_| false);
        assert!(!a.same(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_bare_input_normalizes_without_fire_once() {
        let listener: Listener<i32> = Listener::new(|_| false);
        let record = ListenerInput::from(listener).into_record();
        assert!(!record.fire_once);
    }

    #[test]
    fn test_wrapped_input_keeps_flag() {
        let listener: Listener<i32> = Listener::new(|_| false);
        let record = ListenerInput::from(ListenerRecord::once(listener)).into_record();
        assert!(record.fire_once);
    }

    #[test]
    fn test_call_forwards_args() {
        let sum: Listener<i32, i32> = Listener::new(|args| args.iter().sum());
        assert_eq!(sum.call(&[1, 2, 3]), 6);
    }
}
