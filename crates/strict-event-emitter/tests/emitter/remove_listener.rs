//! Tests for `Emitter::remove_listener` / `off`.

use std::sync::{Arc, Mutex};

use strict_event_emitter::{Emitter, Listener, ListenerChange, RemoveListener};

use super::support::{args, make_log, recording, Events, Goodbye, Hello};

#[test]
fn removes_a_single_listener() {
    let emitter: Emitter<Events> = Emitter::new();
    let log = make_log();
    let listener = recording(&log, "hello");

    emitter.on::<Hello>(listener.clone());
    emitter.remove_listener::<Hello>(&listener);
    emitter.emit::<Hello>(&args("John"));

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(emitter.listener_count("hello"), 0);
    assert!(emitter.listeners::<Hello>().is_empty());
}

#[test]
fn removes_a_single_listener_but_not_others() {
    let emitter: Emitter<Events> = Emitter::new();
    let log = make_log();
    let first = recording(&log, "first");
    let second = recording(&log, "second");

    emitter.on::<Hello>(first.clone()).on::<Hello>(second.clone());
    emitter.remove_listener::<Hello>(&first);

    assert_eq!(emitter.listener_count("hello"), 1);
    assert_eq!(emitter.listeners::<Hello>(), vec![second]);

    emitter.emit::<Hello>(&args("John"));
    assert_eq!(*log.lock().unwrap(), vec!["second:John"]);
}

#[test]
fn removes_only_the_first_of_duplicate_registrations() {
    let emitter: Emitter<Events> = Emitter::new();
    let log = make_log();
    let listener = recording(&log, "hello");

    emitter.on::<Hello>(listener.clone()).on::<Hello>(listener.clone());
    emitter.off::<Hello>(&listener);

    assert_eq!(emitter.listener_count("hello"), 1);
    emitter.emit::<Hello>(&args("John"));
    assert_eq!(*log.lock().unwrap(), vec!["hello:John"]);
}

#[test]
fn matches_by_identity_not_behavior() {
    let emitter: Emitter<Events> = Emitter::new();
    let log = make_log();
    let a = recording(&log, "same");
    let b = recording(&log, "same");

    emitter.on::<Hello>(a.clone()).on::<Hello>(b);
    emitter.off::<Hello>(&a);
    emitter.off::<Hello>(&a);

    assert_eq!(emitter.listener_count("hello"), 1);
    emitter.emit::<Hello>(&args("John"));
    assert_eq!(*log.lock().unwrap(), vec!["same:John"]);
}

#[test]
fn removing_the_last_listener_drops_the_event_name() {
    let emitter: Emitter<Events> = Emitter::new();
    let listener = Listener::new(|_: &(String,)| {});

    emitter
        .on::<Goodbye>(Listener::new(|_: &(String,)| {}))
        .on::<Hello>(listener.clone());
    emitter.off::<Hello>(&listener);

    assert_eq!(emitter.event_names(), vec!["goodbye"]);
}

#[test]
fn emits_remove_listener_after_the_listener_is_removed() {
    let emitter: Emitter<Events> = Emitter::new();
    let listener = Listener::new(|_: &(String,)| {});
    let seen: Arc<Mutex<Vec<(ListenerChange, usize)>>> = Arc::new(Mutex::new(Vec::new()));

    emitter.on::<Hello>(listener.clone());
    {
        let weak = emitter.downgrade();
        let seen = Arc::clone(&seen);
        emitter.once::<RemoveListener>(Listener::new(move |change: &ListenerChange| {
            if let Some(emitter) = weak.upgrade() {
                // Removal has already been applied.
                let count = emitter.listener_count("hello");
                seen.lock().unwrap().push((change.clone(), count));
            }
        }));
    }
    emitter.remove_listener::<Hello>(&listener);

    let seen = seen.lock().unwrap();
    // The once-observer removed itself too, which it cannot observe.
    assert_eq!(seen.len(), 1);
    let ((event_name, removed), count) = &seen[0];
    assert_eq!(*event_name, "hello");
    assert_eq!(*removed, listener);
    assert_eq!(*count, 0);
}

#[test]
fn unknown_listener_or_event_is_a_silent_no_op() {
    let emitter: Emitter<Events> = Emitter::new();
    let notifications = make_log();
    {
        let notifications = Arc::clone(&notifications);
        emitter.on::<RemoveListener>(Listener::new(move |(event_name, _): &ListenerChange| {
            notifications.lock().unwrap().push(event_name.to_string());
        }));
    }
    let registered = Listener::new(|_: &(String,)| {});
    let stranger = Listener::new(|_: &(String,)| {});

    emitter.off::<Goodbye>(&stranger);
    emitter.on::<Hello>(registered);
    emitter.off::<Hello>(&stranger);

    assert_eq!(emitter.listener_count("hello"), 1);
    assert!(notifications.lock().unwrap().is_empty());
}
