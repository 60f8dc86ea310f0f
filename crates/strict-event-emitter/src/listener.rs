//! Listener handles.
//!
//! A [`Listener<A>`] wraps an `Arc<dyn Fn(&A)>` together with a process-unique
//! [`ListenerId`]. Clones share the id, and the id is the only thing removal
//! matches on: two listeners with identical behavior that were constructed
//! separately are distinct entries.
//!
//! [`AnyListener`] is the type-erased form emitters store. It is what
//! `newListener` / `removeListener` observers receive, and it can be compared
//! against or downcast back to the typed handle.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Identity of a listener. Shared by all clones of the same [`Listener`].
pub type ListenerId = u64;

/// Closure type for event listeners.
pub type ListenerFn<A> = dyn Fn(&A) + Send + Sync;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

fn next_listener_id() -> ListenerId {
    NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed)
}

// ============================================================================
// Listener<A>
// ============================================================================

/// A registered (or registrable) callback taking `&A`.
pub struct Listener<A> {
    id: ListenerId,
    name: Option<Arc<str>>,
    wraps: Option<ListenerId>,
    callback: Arc<ListenerFn<A>>,
}

impl<A> Listener<A> {
    /// Create a listener with a fresh identity.
    pub fn new(callback: impl Fn(&A) + Send + Sync + 'static) -> Self {
        Self {
            id: next_listener_id(),
            name: None,
            wraps: None,
            callback: Arc::new(callback),
        }
    }

    /// Create a listener carrying a display name, used in `Debug` output and
    /// inherited by once-wrappers.
    pub fn named(name: impl Into<Arc<str>>, callback: impl Fn(&A) + Send + Sync + 'static) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(callback)
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// For a once-wrapper, the id of the listener it forwards to.
    pub fn wrapped_id(&self) -> Option<ListenerId> {
        self.wraps
    }

    /// Invoke the callback directly.
    pub fn call(&self, args: &A) {
        (self.callback)(args)
    }

    /// `true` if both handles refer to the same registration identity.
    pub fn same(&self, other: &Listener<A>) -> bool {
        self.id == other.id
    }
}

impl<A: 'static> Listener<A> {
    /// Wrap `self` in a listener that fires at most once.
    ///
    /// The wrapper has its own id. On its first call it hands that id to
    /// `detach` (which removes the wrapper from wherever it is registered) and
    /// then forwards the arguments to the original. Later calls, including
    /// ones from a snapshot taken before the detach, do nothing.
    pub(crate) fn once_wrapper(
        self,
        detach: impl Fn(ListenerId) + Send + Sync + 'static,
    ) -> Listener<A> {
        let id = next_listener_id();
        let name = self.name.clone();
        let wraps = Some(self.id);
        let fired = AtomicBool::new(false);

        let callback = move |args: &A| {
            if fired.swap(true, Ordering::AcqRel) {
                return;
            }
            detach(id);
            self.call(args);
        };

        Listener {
            id,
            name,
            wraps,
            callback: Arc::new(callback),
        }
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            wraps: self.wraps,
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<A> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A> Eq for Listener<A> {}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("wraps", &self.wraps)
            .finish()
    }
}

// ============================================================================
// AnyListener
// ============================================================================

type InvokeFn = fn(&(dyn Any + Send + Sync), &dyn Any) -> bool;

/// A [`Listener`] with its argument type erased.
#[derive(Clone)]
pub struct AnyListener {
    id: ListenerId,
    name: Option<Arc<str>>,
    wraps: Option<ListenerId>,
    listener: Arc<dyn Any + Send + Sync>,
    invoke: InvokeFn,
}

fn invoke_typed<A: 'static>(listener: &(dyn Any + Send + Sync), args: &dyn Any) -> bool {
    match (listener.downcast_ref::<Listener<A>>(), args.downcast_ref::<A>()) {
        (Some(listener), Some(args)) => {
            listener.call(args);
            true
        }
        _ => false,
    }
}

impl AnyListener {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn wrapped_id(&self) -> Option<ListenerId> {
        self.wraps
    }

    /// Recover the typed handle if `A` is the argument type it was built for.
    pub fn downcast<A: 'static>(&self) -> Option<Listener<A>> {
        let erased: &(dyn Any + Send + Sync) = &*self.listener;
        erased.downcast_ref::<Listener<A>>().cloned()
    }

    /// `true` if this is (a clone of) `listener`.
    pub fn is<A>(&self, listener: &Listener<A>) -> bool {
        self.id == listener.id
    }

    /// Call the listener with a type-erased argument tuple. Returns `false`
    /// without calling anything when `args` is not the listener's type.
    pub(crate) fn invoke(&self, args: &dyn Any) -> bool {
        (self.invoke)(&*self.listener, args)
    }
}

impl<A: 'static> From<Listener<A>> for AnyListener {
    fn from(listener: Listener<A>) -> Self {
        Self {
            id: listener.id,
            name: listener.name.clone(),
            wraps: listener.wraps,
            listener: Arc::new(listener),
            invoke: invoke_typed::<A>,
        }
    }
}

impl PartialEq for AnyListener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AnyListener {}

impl<A> PartialEq<Listener<A>> for AnyListener {
    fn eq(&self, other: &Listener<A>) -> bool {
        self.is(other)
    }
}

impl<A> PartialEq<AnyListener> for Listener<A> {
    fn eq(&self, other: &AnyListener) -> bool {
        other.is(self)
    }
}

impl fmt::Debug for AnyListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyListener")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("wraps", &self.wraps)
            .finish()
    }
}
