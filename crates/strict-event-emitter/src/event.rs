//! Event maps: the compile-time contract between emitters and listeners.
//!
//! An [`EventMap`] is a marker type an emitter is parameterized by. Every
//! event the map accepts is a zero-sized type implementing [`Event<M>`], which
//! pins the event's name and the argument tuple its listeners receive.
//! Listening to or emitting an event that is not declared for the emitter's
//! map, or passing the wrong argument tuple, does not compile.
//!
//! Use [`event_map!`](crate::event_map) to declare a map and its events in one
//! place.

use crate::listener::AnyListener;

/// The key listeners are grouped under.
pub type EventName = &'static str;

/// Name of the lifecycle event fired *before* a listener is added.
pub const NEW_LISTENER: EventName = "newListener";

/// Name of the lifecycle event fired *after* a listener is removed.
pub const REMOVE_LISTENER: EventName = "removeListener";

/// Marker trait for a declared set of events.
pub trait EventMap: 'static {}

/// An event belonging to the map `M`.
pub trait Event<M: EventMap>: 'static {
    /// Name the event's listeners are registered under.
    const NAME: EventName;

    /// Argument tuple passed (by reference) to every listener.
    type Args: 'static;
}

/// Arguments delivered to lifecycle observers: the name of the event whose
/// listener set changed, and the listener that was added or removed.
pub type ListenerChange = (EventName, AnyListener);

/// Lifecycle event fired before any listener is added to an emitter.
///
/// Observers run before the addition, so `listener_count` does not include the
/// listener being added yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewListener;

/// Lifecycle event fired after a listener has been removed from an emitter.
///
/// Only single removals fire it; `remove_all_listeners` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemoveListener;

impl<M: EventMap> Event<M> for NewListener {
    const NAME: EventName = NEW_LISTENER;
    type Args = ListenerChange;
}

impl<M: EventMap> Event<M> for RemoveListener {
    const NAME: EventName = REMOVE_LISTENER;
    type Args = ListenerChange;
}
