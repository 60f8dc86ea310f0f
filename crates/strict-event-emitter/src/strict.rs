//! `StrictEmitter<M, D>`: narrows an untyped [`Dispatcher`] to the event map
//! `M`.
//!
//! Every method forwards to the dispatcher unchanged; the only thing added is
//! the compile-time check that event names and argument tuples agree with `M`.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::event::{Event, EventMap, EventName};
use crate::listener::{AnyListener, Listener};
use crate::raw::{Dispatcher, RawEmitter};

/// Typed view over a shared dispatcher.
pub struct StrictEmitter<M: EventMap, D: Dispatcher + 'static = RawEmitter> {
    dispatcher: Arc<D>,
    _map: PhantomData<fn() -> M>,
}

impl<M: EventMap> StrictEmitter<M> {
    /// Narrow a fresh [`RawEmitter`].
    pub fn new() -> Self {
        Self::from_dispatcher(Arc::new(RawEmitter::new()))
    }
}

impl<M: EventMap> Default for StrictEmitter<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EventMap, D: Dispatcher + 'static> StrictEmitter<M, D> {
    /// Narrow an existing dispatcher. Other handles to it keep working
    /// untyped.
    pub fn from_dispatcher(dispatcher: Arc<D>) -> Self {
        Self {
            dispatcher,
            _map: PhantomData,
        }
    }

    pub fn dispatcher(&self) -> &Arc<D> {
        &self.dispatcher
    }

    pub fn on<E: Event<M>>(&self, listener: Listener<E::Args>) -> &Self {
        self.dispatcher.add_listener(E::NAME, listener.into());
        self
    }

    pub fn add_listener<E: Event<M>>(&self, listener: Listener<E::Args>) -> &Self {
        self.on::<E>(listener)
    }

    pub fn once<E: Event<M>>(&self, listener: Listener<E::Args>) -> &Self {
        let dispatcher = Arc::downgrade(&self.dispatcher);
        let wrapper = listener.once_wrapper(move |id| {
            if let Some(dispatcher) = dispatcher.upgrade() {
                dispatcher.remove_listener(E::NAME, id);
            }
        });
        self.dispatcher.add_listener(E::NAME, wrapper.into());
        self
    }

    pub fn prepend_listener<E: Event<M>>(&self, listener: Listener<E::Args>) -> &Self {
        self.dispatcher.prepend_listener(E::NAME, listener.into());
        self
    }

    pub fn off<E: Event<M>>(&self, listener: &Listener<E::Args>) -> &Self {
        self.dispatcher.remove_listener(E::NAME, listener.id());
        self
    }

    pub fn remove_listener<E: Event<M>>(&self, listener: &Listener<E::Args>) -> &Self {
        self.off::<E>(listener)
    }

    pub fn remove_all_listeners(&self, event_name: impl Into<Option<EventName>>) -> &Self {
        self.dispatcher.remove_all_listeners(event_name.into());
        self
    }

    pub fn emit<E: Event<M>>(&self, args: &E::Args) -> bool {
        self.dispatcher.emit(E::NAME, args)
    }

    pub fn event_names(&self) -> Vec<EventName> {
        self.dispatcher.event_names()
    }

    pub fn listeners<E: Event<M>>(&self) -> Vec<Listener<E::Args>> {
        self.dispatcher
            .listeners(E::NAME)
            .iter()
            .filter_map(AnyListener::downcast::<E::Args>)
            .collect()
    }

    pub fn raw_listeners<E: Event<M>>(&self) -> Vec<Listener<E::Args>> {
        self.listeners::<E>()
    }

    pub fn listener_count(&self, event_name: EventName) -> usize {
        self.dispatcher.listener_count(event_name)
    }
}

impl<M: EventMap, D: Dispatcher + 'static> Clone for StrictEmitter<M, D> {
    fn clone(&self) -> Self {
        Self::from_dispatcher(Arc::clone(&self.dispatcher))
    }
}
