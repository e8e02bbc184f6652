//! # eventry
//!
//! **Eventry** is a synchronous, in-process publish/subscribe registry.
//!
//! Callers register named listeners against event identifiers and later
//! trigger all matching listeners synchronously, optionally passing
//! arguments. Events are addressed either by exact name or by a regex
//! selector over the names that already exist in the table.
//!
//! ## Architecture
//! ```text
//!  add / remove / define          emit
//!         │                        │
//!         ▼                        ▼
//! ┌───────────────────────────────────────────────┐
//! │  Registry                                     │
//! │  EventId ──► resolve ──► key set              │
//! │    Key("foo")        exactly one (created)    │
//! │    Pattern(/^ba/)    every existing match     │
//! │                                               │
//! │  table: event name ──► [ListenerRecord, ...]  │
//! │         (insertion order, both levels)        │
//! └───────────────────────────────────────────────┘
//!                          │ per key: snapshot, then invoke in order
//!                          ▼
//!              listener(&[args]) -> R
//!              return == once-sentinel ──► listener removed
//! ```
//!
//! ## Rules
//! - **At-most-once, synchronous, best-effort**: dispatch runs every resolved
//!   listener in registration order on the calling thread. Nothing is queued,
//!   retried, or delivered across threads.
//! - **Snapshot dispatch**: a listener may add or remove listeners (even for
//!   the event currently firing) without affecting the running pass; the
//!   mutation is visible to the next dispatch.
//! - **Fire-once**: a listener registered fire-once is removed immediately
//!   *before* its first invocation. Independently, any listener whose return
//!   value equals the registry's once-sentinel (default `true`) is removed
//!   after that call.
//! - **No fault isolation**: a panicking listener unwinds through the emit
//!   call to the caller and aborts the remainder of that dispatch pass. Wrap
//!   emits in your own boundary if you need isolation.
//! - **Patterns select, never create**: a pattern only reaches keys that were
//!   defined or populated beforehand; see [`Registry::define_event`].
//!
//! ## Quick reference
//!
//! | Concern         | What it is for                                   | Types |
//! |-----------------|--------------------------------------------------|-------|
//! | **Storage**     | Event table and every operation on it.           | [`Registry`] |
//! | **Addressing**  | Exact key vs. regex fan-out.                     | [`EventId`] |
//! | **Listeners**   | Invocable handles and registration records.      | [`Listener`], [`ListenerRecord`], [`ListenerInput`] |
//! | **Bulk ops**    | One traversal for batch add/remove.              | [`ManipulationTarget`], [`ListenerBatch`] |
//! | **Errors**      | Invalid pattern sources.                         | [`RegistryError`] |
//!
//! ## Example
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use eventry::{EventId, Listener, Registry};
//!
//! let registry: Registry<String> = Registry::new();
//! let greeted = Rc::new(Cell::new(0));
//!
//! let greeter = {
//!     let greeted = Rc::clone(&greeted);
//!     Listener::new(move |args: &[String]| {
//!         greeted.set(greeted.get() + args.len());
//!         false // anything but the once-sentinel keeps us registered
//!     })
//! };
//!
//! registry
//!     .define_events(&["user/join", "user/leave"])
//!     .add_listener(&EventId::key("user/join"), greeter.clone())
//!     .add_listener(&EventId::key("user/leave"), greeter);
//!
//! // Fan out to both events through one pattern.
//! registry.emit_event(
//!     &EventId::pattern("^user/").unwrap(),
//!     &["alice".to_string()],
//! );
//! assert_eq!(greeted.get(), 2);
//! ```
//!
//! The registry is single-threaded by design: listeners are `Rc`-backed and
//! the type is `!Send`. Re-entrant access from inside a listener goes through
//! an `Rc`/`Weak` handle to the registry.

mod error;
mod event_id;
mod listener;
mod manipulate;
mod registry;

// ---- Public re-exports ----

pub use error::RegistryError;
pub use event_id::EventId;
pub use listener::{Listener, ListenerInput, ListenerRecord};
pub use manipulate::{ListenerBatch, ManipulationTarget};
pub use registry::Registry;
