//! Tests for `Emitter::listeners`, `raw_listeners` and `event_names`.

use strict_event_emitter::{AnyListener, Emitter, Listener, ListenerChange, NewListener};

use super::support::{args, make_log, recording, Events, Goodbye, Hello};

#[test]
fn returns_a_copy_matching_the_registered_sequence() {
    let emitter: Emitter<Events> = Emitter::new();
    let log = make_log();
    let a = recording(&log, "a");
    let b = recording(&log, "b");

    emitter.on::<Hello>(a.clone()).on::<Hello>(b.clone());
    let listeners = emitter.listeners::<Hello>();

    assert_eq!(listeners.len(), emitter.listener_count("hello"));
    assert_eq!(listeners, vec![a, b]);
    assert_eq!(emitter.raw_listeners::<Hello>(), listeners);
}

#[test]
fn mutating_the_returned_copy_does_not_affect_the_emitter() {
    let emitter: Emitter<Events> = Emitter::new();
    let log = make_log();

    emitter.on::<Hello>(recording(&log, "registered"));
    let mut listeners = emitter.listeners::<Hello>();
    listeners.clear();
    listeners.push(recording(&log, "injected"));

    emitter.emit::<Hello>(&args("John"));

    assert_eq!(*log.lock().unwrap(), vec!["registered:John"]);
    assert_eq!(emitter.listener_count("hello"), 1);
}

#[test]
fn returns_an_empty_list_for_unknown_events() {
    let emitter: Emitter<Events> = Emitter::new();
    assert!(emitter.listeners::<Goodbye>().is_empty());
}

#[test]
fn returned_listeners_are_callable() {
    let emitter: Emitter<Events> = Emitter::new();
    let log = make_log();

    emitter.on::<Hello>(recording(&log, "direct"));
    for listener in emitter.listeners::<Hello>() {
        listener.call(&args("Ann"));
    }

    assert_eq!(*log.lock().unwrap(), vec!["direct:Ann"]);
}

#[test]
fn event_names_follow_first_registration_order() {
    let emitter: Emitter<Events> = Emitter::new();
    let noop = || Listener::new(|_: &(String,)| {});

    assert!(emitter.event_names().is_empty());

    emitter
        .on::<Goodbye>(noop())
        .on::<Hello>(noop())
        .on::<Goodbye>(noop());
    assert_eq!(emitter.event_names(), vec!["goodbye", "hello"]);

    emitter.remove_all_listeners("goodbye");
    emitter.on::<Goodbye>(noop());
    assert_eq!(emitter.event_names(), vec!["hello", "goodbye"]);
}

#[test]
fn event_names_include_lifecycle_observers() {
    let emitter: Emitter<Events> = Emitter::new();

    emitter.on::<NewListener>(Listener::new(|_: &ListenerChange| {}));

    assert_eq!(emitter.event_names(), vec!["newListener"]);
}

#[test]
fn erased_and_typed_handles_compare_by_identity() {
    let listener = Listener::new(|_: &(String,)| {});
    let erased = AnyListener::from(listener.clone());
    let other = Listener::new(|_: &(String,)| {});

    assert_eq!(erased, listener);
    assert_eq!(listener, erased);
    assert!(erased.is(&listener));
    assert!(!erased.is(&other));
    assert_eq!(erased.downcast::<(String,)>(), Some(listener));
    assert!(erased.downcast::<(u32,)>().is_none());
}
