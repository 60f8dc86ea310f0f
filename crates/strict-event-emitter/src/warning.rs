//! MemoryLeakWarning: the diagnostic issued when an event accumulates more
//! listeners than the emitter's threshold allows.
//!
//! The warning is a value handed to the emitter's warning handler; it is never
//! returned as an error and never interrupts registration or delivery.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::emitter::{Emitter, WeakEmitter};
use crate::event::{EventMap, EventName};

/// Receives leak warnings. Installed with
/// [`Emitter::set_warning_handler`](crate::Emitter::set_warning_handler).
pub type WarningHandler<M> = Arc<dyn Fn(&MemoryLeakWarning<M>) + Send + Sync>;

#[derive(Error)]
#[error(
    "Possible EventEmitter memory leak detected. {count} {event_name} listeners added. \
     Use emitter.set_max_listeners() to increase limit"
)]
pub struct MemoryLeakWarning<M: EventMap> {
    emitter: WeakEmitter<M>,
    /// The event whose listener count crossed the threshold.
    pub event_name: EventName,
    /// Listener count right after the registration that crossed it.
    pub count: usize,
}

impl<M: EventMap> MemoryLeakWarning<M> {
    pub const NAME: &'static str = "MaxListenersExceededWarning";

    pub(crate) fn new(emitter: WeakEmitter<M>, event_name: EventName, count: usize) -> Self {
        Self {
            emitter,
            event_name,
            count,
        }
    }

    /// The emitter that produced the warning, if it is still alive.
    pub fn emitter(&self) -> Option<Emitter<M>> {
        self.emitter.upgrade()
    }
}

impl<M: EventMap> Clone for MemoryLeakWarning<M> {
    fn clone(&self) -> Self {
        Self::new(self.emitter.clone(), self.event_name, self.count)
    }
}

impl<M: EventMap> fmt::Debug for MemoryLeakWarning<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(Self::NAME)
            .field("event_name", &self.event_name)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

/// Default handler: report through `tracing`.
pub(crate) fn log_warning<M: EventMap>(warning: &MemoryLeakWarning<M>) {
    tracing::warn!(
        warning = MemoryLeakWarning::<M>::NAME,
        event = warning.event_name,
        count = warning.count,
        "{warning}"
    );
}
