//! Type-safe, Node.js-compatible synchronous event emitter.
//!
//! # Overview
//!
//! [`Emitter<M>`] is a listener registry parameterized by an event map `M`.
//! Each event in the map fixes its name and the argument tuple its listeners
//! take, so mismatches are compile errors:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use strict_event_emitter::{event_map, Emitter, Listener};
//!
//! event_map! {
//!     struct Events {
//!         Hello = "hello" => (String,),
//!     }
//! }
//!
//! let emitter: Emitter<Events> = Emitter::new();
//! let greeted = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&greeted);
//!
//! emitter.on::<Hello>(Listener::new(move |(name,): &(String,)| {
//!     log.lock().unwrap().push(name.clone());
//! }));
//!
//! assert!(emitter.emit::<Hello>(&("John".to_string(),)));
//! assert_eq!(*greeted.lock().unwrap(), vec!["John".to_string()]);
//! ```
//!
//! # Modules
//!
//! - [`event`]: [`EventMap`], [`Event`] and the reserved [`NewListener`] /
//!   [`RemoveListener`] lifecycle events.
//! - [`listener`]: [`Listener<A>`] handles and their erased form
//!   [`AnyListener`].
//! - [`emitter`]: the registry, [`Emitter<M>`], and its [`EmitterOptions`].
//! - [`warning`]: [`MemoryLeakWarning`].
//! - [`raw`] / [`strict`]: the untyped [`RawEmitter`] primitive and the
//!   [`StrictEmitter`] adapter that narrows any [`Dispatcher`].

pub mod emitter;
pub mod event;
pub mod listener;
pub mod raw;
pub mod strict;
pub mod warning;

mod macros;
mod table;

pub use emitter::{
    Emitter, EmitterOptions, LeakWarningPolicy, WeakEmitter, DEFAULT_MAX_LISTENERS, UNLIMITED,
};
pub use event::{
    Event, EventMap, EventName, ListenerChange, NewListener, RemoveListener, NEW_LISTENER,
    REMOVE_LISTENER,
};
pub use listener::{AnyListener, Listener, ListenerFn, ListenerId};
pub use raw::{Dispatcher, RawEmitter};
pub use strict::StrictEmitter;
pub use warning::{MemoryLeakWarning, WarningHandler};
