//! # Listener registry: storage, resolution and synchronous dispatch.
//!
//! [`Registry`] owns the event table (event name → ordered listener list) and
//! every operation that reads or mutates it.
//!
//! ## Architecture
//! ```text
//!                    EventId::Key ─────► one key (materialized if absent)
//! add / remove ──►  resolve_keys ─┤
//! emit               EventId::Pattern ─► every existing matching key
//!                        │
//!                        ▼
//!        IndexMap<String, Vec<ListenerRecord>>   (insertion order)
//! ```
//!
//! ## Rules
//! - **Snapshot dispatch**: each resolved list is copied before iteration, so
//!   add/remove performed by a listener (even against the event currently
//!   firing) never affects the running pass; it is visible to the next one.
//! - **No borrow across invocation**: the table is released before every
//!   listener call, which is what makes re-entrant registry access from
//!   inside a listener safe.
//! - **Fire-once before firing**: a fire-once record is removed from the live
//!   list *before* its callback runs, so a re-entrant emit from inside that
//!   callback cannot trigger it again.
//! - **No fault isolation**: a panicking listener unwinds to the emitter's
//!   caller and aborts the remainder of that dispatch pass.
//! - Removal operations never fail; missing targets are no-ops.

use std::cell::RefCell;
use std::fmt;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::event_id::EventId;
use crate::listener::{Listener, ListenerInput, ListenerRecord};
use crate::manipulate::{ListenerBatch, ManipulationTarget};

/// Synchronous in-process publish/subscribe registry.
///
/// `A` is the argument element type passed to listeners as a slice; `R` is
/// the listener return type, compared against the once-sentinel (default
/// `bool`, sentinel `true`).
///
/// All operations take `&self` (the table sits behind a [`RefCell`]) and
/// return `&Self` for chaining. The registry is single-threaded by design:
/// listeners are `Rc`-backed, and the type is deliberately `!Send`.
///
/// # Example
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use eventry::{EventId, Listener, Registry};
///
/// let registry: Registry<i32> = Registry::new();
/// let total = Rc::new(Cell::new(0));
///
/// let sink = {
///     let total = Rc::clone(&total);
///     Listener::new(move |args: &[i32]| {
///         total.set(total.get() + args.iter().sum::<i32>());
///         false
///     })
/// };
///
/// registry
///     .add_listener(&EventId::key("sample"), sink)
///     .emit_event(&EventId::key("sample"), &[1, 2]);
///
/// assert_eq!(total.get(), 3);
/// ```
pub struct Registry<A, R = bool> {
    table: RefCell<IndexMap<String, Vec<ListenerRecord<A, R>>>>,
    once_return_value: RefCell<R>,
}

impl<A> Registry<A, bool> {
    /// Creates an empty registry with the once-sentinel set to `true`.
    pub fn new() -> Self {
        Self::with_once_return_value(true)
    }
}

impl<A> Default for Registry<A, bool> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> Registry<A, R>
where
    R: PartialEq + Clone,
{
    /// Creates an empty registry with an explicit once-sentinel.
    ///
    /// Any listener whose return value equals the sentinel is removed after
    /// that invocation, exactly as if it had been registered fire-once.
    pub fn with_once_return_value(value: R) -> Self {
        Self {
            table: RefCell::new(IndexMap::new()),
            once_return_value: RefCell::new(value),
        }
    }

    /// Replaces the once-sentinel for subsequent dispatches.
    pub fn set_once_return_value(&self, value: R) -> &Self {
        *self.once_return_value.borrow_mut() = value;
        self
    }

    /// Returns the current once-sentinel.
    pub fn once_return_value(&self) -> R {
        self.once_return_value.borrow().clone()
    }

    /// Resolves an identifier to the affected key set.
    ///
    /// Exact keys are materialized with an empty list if absent; patterns
    /// select existing keys only, in table order.
    fn resolve_keys(&self, id: &EventId) -> Vec<String> {
        match id {
            EventId::Key(name) => {
                self.table
                    .borrow_mut()
                    .entry(name.clone())
                    .or_insert_with(Vec::new);
                vec![name.clone()]
            }
            EventId::Pattern(pattern) => self
                .table
                .borrow()
                .keys()
                .filter(|key| pattern.is_match(key.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Returns the resolved key → list snapshot for an identifier.
    ///
    /// Exact keys resolve to exactly one entry (materialized if absent);
    /// patterns resolve to every existing matching key, in table order, and
    /// an empty result if nothing matches. Never fails.
    pub fn listeners(&self, id: &EventId) -> Vec<(String, Vec<ListenerRecord<A, R>>)> {
        self.resolve_keys(id)
            .into_iter()
            .map(|key| {
                let list = self.table.borrow().get(&key).cloned().unwrap_or_default();
                (key, list)
            })
            .collect()
    }

    /// Registers a listener (bare or pre-wrapped record) for every resolved
    /// key.
    ///
    /// A key already holding the same underlying listener is left untouched;
    /// the `fire_once` flag of the existing record wins. Returns `&Self` for
    /// chaining.
    pub fn add_listener(&self, id: &EventId, input: impl Into<ListenerInput<A, R>>) -> &Self {
        let record = input.into().into_record();
        for key in self.resolve_keys(id) {
            let mut table = self.table.borrow_mut();
            if let Some(list) = table.get_mut(&key) {
                if list.iter().any(|held| held.listener.same(&record.listener)) {
                    continue;
                }
                list.push(record.clone());
                trace!("listener added: event={key} fire_once={}", record.fire_once);
            }
        }
        self
    }

    /// Registers a fire-once listener: removed immediately before its first
    /// invocation.
    pub fn add_once_listener(&self, id: &EventId, listener: Listener<A, R>) -> &Self {
        self.add_listener(id, ListenerRecord::once(listener))
    }

    /// Registers a batch of listeners, last element first.
    pub fn add_listeners(
        &self,
        id: &EventId,
        inputs: Vec<ListenerInput<A, R>>,
    ) -> &Self {
        for input in inputs.into_iter().rev() {
            self.add_listener(id, input);
        }
        self
    }

    /// Materializes an empty list for an exact key, making it discoverable
    /// by future pattern lookups before any listener is attached.
    pub fn define_event(&self, name: &str) -> &Self {
        self.table
            .borrow_mut()
            .entry(name.to_owned())
            .or_insert_with(Vec::new);
        debug!("event defined: {name}");
        self
    }

    /// Materializes empty lists for several exact keys.
    pub fn define_events(&self, names: &[&str]) -> &Self {
        for name in names {
            self.define_event(name);
        }
        self
    }

    /// Removes the listener from every resolved key's list.
    ///
    /// The search runs from the end of each list backward and removes the
    /// highest-indexed match. Absent targets are no-ops, never errors.
    pub fn remove_listener(&self, id: &EventId, listener: &Listener<A, R>) -> &Self {
        for key in self.resolve_keys(id) {
            if self.remove_from_live(&key, listener) {
                trace!("listener removed: event={key}");
            }
        }
        self
    }

    /// Removes a batch of listeners, last element first.
    pub fn remove_listeners(&self, id: &EventId, listeners: &[Listener<A, R>]) -> &Self {
        for listener in listeners.iter().rev() {
            self.remove_listener(id, listener);
        }
        self
    }

    /// Bulk add (`remove = false`) or bulk remove (`remove = true`) through
    /// one traversal.
    ///
    /// [`ManipulationTarget::ByKey`] and [`ManipulationTarget::ByPattern`]
    /// route the batch to the plural operation for that identifier;
    /// [`ManipulationTarget::ByMap`] recurses one level, routing each event's
    /// [`ListenerBatch`] to the singular or plural operation.
    pub fn manipulate_listeners(&self, remove: bool, target: ManipulationTarget<A, R>) -> &Self {
        match target {
            ManipulationTarget::ByKey { event, listeners } => {
                self.manipulate_for_id(remove, &EventId::Key(event), listeners);
            }
            ManipulationTarget::ByPattern { pattern, listeners } => {
                self.manipulate_for_id(remove, &EventId::Pattern(pattern), listeners);
            }
            ManipulationTarget::ByMap(entries) => {
                for (event, batch) in entries {
                    let id = EventId::Key(event);
                    match batch {
                        ListenerBatch::One(input) => {
                            if remove {
                                self.remove_listener(&id, &input.into_record().listener);
                            } else {
                                self.add_listener(&id, input);
                            }
                        }
                        ListenerBatch::Many(inputs) => {
                            self.manipulate_for_id(remove, &id, inputs);
                        }
                    }
                }
            }
        }
        self
    }

    fn manipulate_for_id(&self, remove: bool, id: &EventId, inputs: Vec<ListenerInput<A, R>>) {
        if remove {
            let listeners: Vec<Listener<A, R>> = inputs
                .into_iter()
                .map(|input| input.into_record().listener)
                .collect();
            self.remove_listeners(id, &listeners);
        } else {
            self.add_listeners(id, inputs);
        }
    }

    /// Deletes the addressed event(s) and their listeners.
    ///
    /// An exact key deletes that entry; a pattern deletes every existing
    /// matching key. The relative order of surviving keys is preserved.
    pub fn remove_event(&self, id: &EventId) -> &Self {
        match id {
            EventId::Key(name) => {
                self.table.borrow_mut().shift_remove(name);
                debug!("event removed: {name}");
            }
            EventId::Pattern(pattern) => {
                let matched: Vec<String> = self
                    .table
                    .borrow()
                    .keys()
                    .filter(|key| pattern.is_match(key.as_str()))
                    .cloned()
                    .collect();
                let mut table = self.table.borrow_mut();
                for name in &matched {
                    table.shift_remove(name);
                }
                debug!("events removed by pattern: {}", matched.len());
            }
        }
        self
    }

    /// Drops every key and every listener.
    pub fn remove_all_events(&self) -> &Self {
        self.table.borrow_mut().clear();
        debug!("all events removed");
        self
    }

    /// Dispatches to every listener resolved for the identifier, in
    /// registration order, passing the argument slice.
    ///
    /// Per resolved key the live list is snapshotted first; for each record
    /// in snapshot order:
    /// 1. a fire-once record is removed from the live list *before* the call;
    /// 2. the callback is invoked with `args`;
    /// 3. a return value equal to the once-sentinel removes the listener from
    ///    the live list (if step 1 did not already).
    ///
    /// # Panics
    /// The registry provides **no fault isolation**: a panicking listener
    /// unwinds to the caller and the remaining listeners and keys of this
    /// pass are skipped. The table stays consistent; wrap the call in your
    /// own boundary if isolation is required.
    pub fn emit_event(&self, id: &EventId, args: &[A]) -> &Self {
        for key in self.resolve_keys(id) {
            let snapshot = self.table.borrow().get(&key).cloned().unwrap_or_default();
            trace!("dispatch: event={key} listeners={}", snapshot.len());
            for record in snapshot {
                if record.fire_once {
                    self.remove_from_live(&key, &record.listener);
                }
                let returned = record.listener.call(args);
                let opted_out = returned == *self.once_return_value.borrow();
                if opted_out && !record.fire_once {
                    self.remove_from_live(&key, &record.listener);
                }
            }
        }
        self
    }

    /// Dispatches with no arguments; sugar for `emit_event(id, &[])`.
    pub fn emit(&self, id: &EventId) -> &Self {
        self.emit_event(id, &[])
    }

    // ---- Aliases (thin forwarding, identical contracts) ----

    /// Alias for [`Registry::add_listener`].
    #[inline]
    pub fn listen(&self, id: &EventId, input: impl Into<ListenerInput<A, R>>) -> &Self {
        self.add_listener(id, input)
    }

    /// Alias for [`Registry::remove_listener`].
    #[inline]
    pub fn unlisten(&self, id: &EventId, listener: &Listener<A, R>) -> &Self {
        self.remove_listener(id, listener)
    }

    /// Alias for [`Registry::emit_event`].
    #[inline]
    pub fn trigger(&self, id: &EventId, args: &[A]) -> &Self {
        self.emit_event(id, args)
    }

    /// Removes the highest-indexed record holding this listener from the
    /// live list of one key. Returns whether a record was removed.
    fn remove_from_live(&self, key: &str, listener: &Listener<A, R>) -> bool {
        let mut table = self.table.borrow_mut();
        if let Some(list) = table.get_mut(key) {
            if let Some(index) = list.iter().rposition(|held| held.listener.same(listener)) {
                list.remove(index);
                return true;
            }
        }
        false
    }
}

impl<A, R> fmt::Debug for Registry<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        let mut map = f.debug_map();
        for (key, list) in table.iter() {
            map.entry(&key, &list.len());
        }
        map.finish()
    }
}
