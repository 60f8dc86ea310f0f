//! Ordered `event name -> listener sequence` storage.
//!
//! Shared by [`Emitter`](crate::Emitter) and [`RawEmitter`](crate::RawEmitter).
//! Event names keep the order in which they were first registered. An entry
//! exists only while it holds at least one listener.

use std::any::Any;

use crate::event::EventName;
use crate::listener::{AnyListener, ListenerId};

/// Where a new listener goes in its event's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Append,
    Prepend,
}

#[derive(Default)]
pub(crate) struct ListenerTable {
    events: Vec<(EventName, Vec<AnyListener>)>,
}

impl ListenerTable {
    fn position(&self, event_name: EventName) -> Option<usize> {
        self.events.iter().position(|(name, _)| *name == event_name)
    }

    /// Insert `listener` and return the event's new listener count.
    pub(crate) fn insert(
        &mut self,
        event_name: EventName,
        listener: AnyListener,
        placement: Placement,
    ) -> usize {
        let index = match self.position(event_name) {
            Some(index) => index,
            None => {
                self.events.push((event_name, Vec::new()));
                self.events.len() - 1
            }
        };
        let listeners = &mut self.events[index].1;
        match placement {
            Placement::Append => listeners.push(listener),
            Placement::Prepend => listeners.insert(0, listener),
        }
        listeners.len()
    }

    /// Remove the first listener with identity `id`, dropping the entry once it
    /// is empty.
    pub(crate) fn remove(&mut self, event_name: EventName, id: ListenerId) -> Option<AnyListener> {
        let index = self.position(event_name)?;
        let listeners = &mut self.events[index].1;
        let at = listeners.iter().position(|listener| listener.id() == id)?;
        let removed = listeners.remove(at);
        if listeners.is_empty() {
            self.events.remove(index);
        }
        Some(removed)
    }

    /// Drop one entry, or every entry when `event_name` is `None`.
    pub(crate) fn clear(&mut self, event_name: Option<EventName>) {
        match event_name {
            Some(event_name) => self.events.retain(|(name, _)| *name != event_name),
            None => self.events.clear(),
        }
    }

    pub(crate) fn names(&self) -> Vec<EventName> {
        self.events.iter().map(|(name, _)| *name).collect()
    }

    pub(crate) fn count(&self, event_name: EventName) -> usize {
        self.position(event_name)
            .map_or(0, |index| self.events[index].1.len())
    }

    /// Copy of the event's current sequence (cheap: ref-count bumps).
    pub(crate) fn snapshot(&self, event_name: EventName) -> Vec<AnyListener> {
        self.position(event_name)
            .map(|index| self.events[index].1.clone())
            .unwrap_or_default()
    }
}

/// Call every listener of `snapshot` in order. Must be called without any
/// lock held so listeners can re-enter the emitter.
pub(crate) fn invoke_all(event_name: EventName, snapshot: &[AnyListener], args: &dyn Any) {
    for listener in snapshot {
        if !listener.invoke(args) {
            tracing::warn!(
                event = event_name,
                listener = listener.id(),
                "skipped listener registered with a different argument type"
            );
        }
    }
}
