//! Emitter<M>: the typed listener registry.
//!
//! Node.js-compatible semantics over a compile-time [`EventMap`]:
//!   - `emit` snapshots the listener sequence before calling anything, so a
//!     listener removed during emission is still called in that round and a
//!     listener added during emission waits for the next one.
//!   - `newListener` is emitted before a listener is added; `removeListener`
//!     after one is removed. Both go through the same registry as user events.
//!   - Crossing the max-listeners threshold reports a [`MemoryLeakWarning`]
//!     (once per emitter by default) and never blocks registration.
//!
//! Panics inside a listener propagate to the caller of `emit` and skip the
//! remaining listeners of that round. There is no error isolation.
//!
//! All methods take `&self`. State lives behind a `parking_lot::Mutex` that is
//! never held while a listener runs, so listeners can call back into the
//! emitter without deadlocking.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventMap, EventName, ListenerChange, NEW_LISTENER, REMOVE_LISTENER};
use crate::listener::{AnyListener, Listener, ListenerId};
use crate::table::{invoke_all, ListenerTable, Placement};
use crate::warning::{log_warning, MemoryLeakWarning, WarningHandler};

/// Threshold a new emitter starts with.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// Threshold value that disables the leak heuristic.
pub const UNLIMITED: usize = 0;

// ============================================================================
// Options
// ============================================================================

/// How often the leak heuristic may fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeakWarningPolicy {
    /// At most one warning for the emitter's whole lifetime.
    #[default]
    Once,
    /// At most one warning per event name.
    PerEvent,
}

/// Construction-time settings for an [`Emitter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitterOptions {
    /// Listener count per event above which a leak warning is reported.
    /// [`UNLIMITED`] (0) disables the check.
    pub max_listeners: usize,
    pub leak_warning: LeakWarningPolicy,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
            leak_warning: LeakWarningPolicy::Once,
        }
    }
}

// ============================================================================
// Internal state
// ============================================================================

struct State {
    table: ListenerTable,
    max_listeners: usize,
    leak_warning: LeakWarningPolicy,
    warned: bool,
    warned_events: HashSet<EventName>,
}

impl State {
    /// Decide whether a count of `count` listeners for `event_name` warrants a
    /// warning, and mark it as issued if so.
    fn check_leak(&mut self, event_name: EventName, count: usize) -> bool {
        if self.max_listeners == UNLIMITED || count <= self.max_listeners {
            return false;
        }
        match self.leak_warning {
            LeakWarningPolicy::Once => !std::mem::replace(&mut self.warned, true),
            LeakWarningPolicy::PerEvent => self.warned_events.insert(event_name),
        }
    }
}

struct Shared<M: EventMap> {
    state: Mutex<State>,
    warning_handler: Mutex<WarningHandler<M>>,
}

// ============================================================================
// Emitter
// ============================================================================

/// Typed synchronous event emitter over the event map `M`.
///
/// Cloning is cheap and yields another handle to the same registry.
pub struct Emitter<M: EventMap> {
    shared: Arc<Shared<M>>,
}

/// Non-owning handle to an [`Emitter`]. Capture this instead of an `Emitter`
/// clone inside listeners to avoid a reference cycle.
pub struct WeakEmitter<M: EventMap> {
    shared: Weak<Shared<M>>,
}

impl<M: EventMap> Emitter<M> {
    /// Create a new, empty emitter with [`DEFAULT_MAX_LISTENERS`].
    pub fn new() -> Self {
        Self::with_options(EmitterOptions::default())
    }

    pub fn with_options(options: EmitterOptions) -> Self {
        let state = State {
            table: ListenerTable::default(),
            max_listeners: options.max_listeners,
            leak_warning: options.leak_warning,
            warned: false,
            warned_events: HashSet::new(),
        };
        let handler: WarningHandler<M> = Arc::new(log_warning::<M>);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                warning_handler: Mutex::new(handler),
            }),
        }
    }

    /// Static form of [`listener_count`](Self::listener_count).
    pub fn listener_count_of(emitter: &Emitter<M>, event_name: EventName) -> usize {
        emitter.listener_count(event_name)
    }

    pub fn downgrade(&self) -> WeakEmitter<M> {
        WeakEmitter {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// `true` if both handles refer to the same registry.
    pub fn ptr_eq(&self, other: &Emitter<M>) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Append `listener` to the listeners of `E`.
    pub fn on<E: Event<M>>(&self, listener: Listener<E::Args>) -> &Self {
        self.register(E::NAME, listener.into(), Placement::Append)
    }

    /// Alias for [`on`](Self::on).
    pub fn add_listener<E: Event<M>>(&self, listener: Listener<E::Args>) -> &Self {
        self.on::<E>(listener)
    }

    /// Append a listener that removes itself before its first call.
    pub fn once<E: Event<M>>(&self, listener: Listener<E::Args>) -> &Self {
        let wrapper = self.once_wrapper(E::NAME, listener);
        self.register(E::NAME, wrapper.into(), Placement::Append)
    }

    /// Insert `listener` at the head of the listeners of `E`.
    pub fn prepend_listener<E: Event<M>>(&self, listener: Listener<E::Args>) -> &Self {
        self.register(E::NAME, listener.into(), Placement::Prepend)
    }

    /// [`once`](Self::once), inserted at the head.
    pub fn prepend_once_listener<E: Event<M>>(&self, listener: Listener<E::Args>) -> &Self {
        let wrapper = self.once_wrapper(E::NAME, listener);
        self.register(E::NAME, wrapper.into(), Placement::Prepend)
    }

    fn once_wrapper<A: 'static>(&self, event_name: EventName, listener: Listener<A>) -> Listener<A> {
        let emitter = self.downgrade();
        listener.once_wrapper(move |id| {
            if let Some(emitter) = emitter.upgrade() {
                emitter.remove_by_id(event_name, id);
            }
        })
    }

    fn register(&self, event_name: EventName, listener: AnyListener, placement: Placement) -> &Self {
        self.notify(NEW_LISTENER, event_name, &listener);

        let id = listener.id();
        let (count, warn) = {
            let mut state = self.shared.state.lock();
            let count = state.table.insert(event_name, listener, placement);
            (count, state.check_leak(event_name, count))
        };
        tracing::trace!(event = event_name, listener = id, count, ?placement, "listener added");

        if warn {
            self.report_leak(event_name, count);
        }
        self
    }

    fn report_leak(&self, event_name: EventName, count: usize) {
        let warning = MemoryLeakWarning::new(self.downgrade(), event_name, count);
        let handler = Arc::clone(&*self.shared.warning_handler.lock());
        handler(&warning);
    }

    // -----------------------------------------------------------------------
    // Emission
    // -----------------------------------------------------------------------

    /// Call every listener of `E`, in order, with `args`.
    ///
    /// Returns `true` if the event had listeners when the call started.
    pub fn emit<E: Event<M>>(&self, args: &E::Args) -> bool {
        let snapshot = self.shared.state.lock().table.snapshot(E::NAME);
        // Lock is released; listeners may call on()/off()/emit().
        invoke_all(E::NAME, &snapshot, args);
        !snapshot.is_empty()
    }

    fn notify(&self, lifecycle: EventName, event_name: EventName, listener: &AnyListener) {
        let snapshot = self.shared.state.lock().table.snapshot(lifecycle);
        if snapshot.is_empty() {
            return;
        }
        let change: ListenerChange = (event_name, listener.clone());
        invoke_all(lifecycle, &snapshot, &change);
    }

    // -----------------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------------

    /// Remove the first registration of `listener` (matched by identity) and
    /// emit `removeListener` afterwards. Does nothing if it is not registered.
    pub fn remove_listener<E: Event<M>>(&self, listener: &Listener<E::Args>) -> &Self {
        self.remove_by_id(E::NAME, listener.id());
        self
    }

    /// Alias for [`remove_listener`](Self::remove_listener).
    pub fn off<E: Event<M>>(&self, listener: &Listener<E::Args>) -> &Self {
        self.remove_listener::<E>(listener)
    }

    fn remove_by_id(&self, event_name: EventName, id: ListenerId) {
        let removed = self.shared.state.lock().table.remove(event_name, id);
        if let Some(removed) = removed {
            tracing::trace!(event = event_name, listener = id, "listener removed");
            self.notify(REMOVE_LISTENER, event_name, &removed);
        }
    }

    /// Drop every listener of one event, or of all events when `None` is
    /// passed. This is a bulk operation: no `removeListener` is emitted.
    pub fn remove_all_listeners(&self, event_name: impl Into<Option<EventName>>) -> &Self {
        let event_name = event_name.into();
        self.shared.state.lock().table.clear(event_name);
        tracing::trace!(event = ?event_name, "listeners cleared");
        self
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Names of events that currently have listeners, in the order they were
    /// first registered.
    pub fn event_names(&self) -> Vec<EventName> {
        self.shared.state.lock().table.names()
    }

    /// Copy of the listeners of `E`. Once-listeners appear as their wrappers,
    /// which can be passed to [`off`](Self::off).
    pub fn listeners<E: Event<M>>(&self) -> Vec<Listener<E::Args>> {
        let snapshot = self.shared.state.lock().table.snapshot(E::NAME);
        snapshot.iter().filter_map(AnyListener::downcast::<E::Args>).collect()
    }

    /// Same as [`listeners`](Self::listeners).
    pub fn raw_listeners<E: Event<M>>(&self) -> Vec<Listener<E::Args>> {
        self.listeners::<E>()
    }

    /// Number of listeners registered for `event_name` (0 if unknown).
    pub fn listener_count(&self, event_name: EventName) -> usize {
        self.shared.state.lock().table.count(event_name)
    }

    // -----------------------------------------------------------------------
    // Leak heuristic
    // -----------------------------------------------------------------------

    /// Set the leak-warning threshold. [`UNLIMITED`] disables it.
    pub fn set_max_listeners(&self, max_listeners: usize) -> &Self {
        self.shared.state.lock().max_listeners = max_listeners;
        self
    }

    pub fn get_max_listeners(&self) -> usize {
        self.shared.state.lock().max_listeners
    }

    /// Route leak warnings to `handler` instead of `tracing`.
    pub fn set_warning_handler(
        &self,
        handler: impl Fn(&MemoryLeakWarning<M>) + Send + Sync + 'static,
    ) -> &Self {
        let handler: WarningHandler<M> = Arc::new(handler);
        *self.shared.warning_handler.lock() = handler;
        self
    }
}

impl<M: EventMap> Default for Emitter<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EventMap> Clone for Emitter<M> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<M: EventMap> fmt::Debug for Emitter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Emitter")
            .field("event_names", &state.table.names())
            .field("max_listeners", &state.max_listeners)
            .field("leak_warning", &state.leak_warning)
            .finish()
    }
}

impl<M: EventMap> WeakEmitter<M> {
    pub fn upgrade(&self) -> Option<Emitter<M>> {
        self.shared.upgrade().map(|shared| Emitter { shared })
    }
}

impl<M: EventMap> Clone for WeakEmitter<M> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<M: EventMap> fmt::Debug for WeakEmitter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakEmitter")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}
