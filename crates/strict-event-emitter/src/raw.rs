//! RawEmitter: an untyped, name-keyed dispatch primitive.
//!
//! Listeners are stored as [`AnyListener`]s and payloads travel as `&dyn Any`,
//! so nothing is checked at compile time. It has no lifecycle events and no
//! leak heuristic. [`StrictEmitter`](crate::StrictEmitter) narrows it (or any
//! other [`Dispatcher`]) to a declared event map.
//!
//! Snapshot-on-emit semantics are the same as [`Emitter`](crate::Emitter):
//!   - A listener removed *during* emission is still called in that round.
//!   - A listener added *during* emission is NOT called until the next emit.

use std::any::Any;

use parking_lot::Mutex;

use crate::event::EventName;
use crate::listener::{AnyListener, ListenerId};
use crate::table::{invoke_all, ListenerTable, Placement};

/// The untyped operations a native event primitive offers.
pub trait Dispatcher: Send + Sync {
    fn add_listener(&self, event_name: EventName, listener: AnyListener);

    fn prepend_listener(&self, event_name: EventName, listener: AnyListener);

    /// Remove the first listener with identity `id`. Returns whether one was
    /// found.
    fn remove_listener(&self, event_name: EventName, id: ListenerId) -> bool;

    fn remove_all_listeners(&self, event_name: Option<EventName>);

    /// Call the listeners of `event_name` with `args`. Returns `true` if there
    /// were any.
    fn emit(&self, event_name: EventName, args: &dyn Any) -> bool;

    fn event_names(&self) -> Vec<EventName>;

    fn listeners(&self, event_name: EventName) -> Vec<AnyListener>;

    fn listener_count(&self, event_name: EventName) -> usize {
        self.listeners(event_name).len()
    }
}

/// Untyped synchronous event emitter.
///
/// All methods take `&self`. Internal state is protected by a
/// `parking_lot::Mutex` that is never held during callbacks.
#[derive(Default)]
pub struct RawEmitter {
    table: Mutex<ListenerTable>,
}

impl RawEmitter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dispatcher for RawEmitter {
    fn add_listener(&self, event_name: EventName, listener: AnyListener) {
        self.table.lock().insert(event_name, listener, Placement::Append);
    }

    fn prepend_listener(&self, event_name: EventName, listener: AnyListener) {
        self.table.lock().insert(event_name, listener, Placement::Prepend);
    }

    fn remove_listener(&self, event_name: EventName, id: ListenerId) -> bool {
        self.table.lock().remove(event_name, id).is_some()
    }

    fn remove_all_listeners(&self, event_name: Option<EventName>) {
        self.table.lock().clear(event_name);
    }

    fn emit(&self, event_name: EventName, args: &dyn Any) -> bool {
        let snapshot = self.table.lock().snapshot(event_name);
        invoke_all(event_name, &snapshot, args);
        !snapshot.is_empty()
    }

    fn event_names(&self) -> Vec<EventName> {
        self.table.lock().names()
    }

    fn listeners(&self, event_name: EventName) -> Vec<AnyListener> {
        self.table.lock().snapshot(event_name)
    }

    fn listener_count(&self, event_name: EventName) -> usize {
        self.table.lock().count(event_name)
    }
}
