//! Subscription behaviour seen through the orchestrator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use exec_timeline::types::Micros;
use exec_timeline::{Frame, Orchestrator, Subscription, TimeScale};

use crate::integration::result;

fn orchestrator() -> Orchestrator {
    Orchestrator::new(TimeScale::new(1000).unwrap())
}

#[test]
fn listener_reads_new_state_through_store_handle() {
    let mut orchestrator = orchestrator();
    orchestrator.set_test_results(vec![result("t1", &[(1, 0), (2, 1000), (3, 1000), (4, 2500)])]);

    let store = orchestrator.store();
    let seen: Arc<Mutex<Vec<(Micros, Option<u32>)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    orchestrator.subscribe(move |_| {
        let snapshot = store.get_snapshot();
        sink.lock()
            .unwrap()
            .push((snapshot.timeline_time(), snapshot.current_frame().map(Frame::line)));
    });

    orchestrator.set_timeline_time(1700);
    orchestrator.set_timeline_time(100);

    assert_eq!(*seen.lock().unwrap(), vec![(1700, Some(3)), (100, Some(1))]);
}

#[test]
fn listener_argument_matches_get_snapshot() {
    let mut orchestrator = orchestrator();
    let store = orchestrator.store();
    let matched = Arc::new(AtomicUsize::new(0));
    let counter = matched.clone();
    orchestrator.subscribe(move |snapshot| {
        if Arc::ptr_eq(snapshot, &store.get_snapshot()) {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    orchestrator.set_test_results(vec![result("t", &[(1, 0)])]);
    orchestrator.toggle_fold(1);

    assert_eq!(matched.load(Ordering::SeqCst), 2);
}

#[test]
fn scrub_without_selection_still_notifies() {
    let mut orchestrator = orchestrator();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    orchestrator.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    orchestrator.set_timeline_time(500);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(orchestrator.timeline_time(), 0);
}

#[test]
fn failed_selection_does_not_notify() {
    let mut orchestrator = orchestrator();
    orchestrator.set_test_results(vec![result("t", &[(1, 0)])]);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    orchestrator.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(orchestrator.select_test("nope").is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn self_unsubscribing_listener_does_not_starve_others() {
    let mut orchestrator = orchestrator();
    let own: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let once = Arc::new(AtomicUsize::new(0));
    let always = Arc::new(AtomicUsize::new(0));

    let handle = own.clone();
    let once_counter = once.clone();
    let sub = orchestrator.subscribe(move |_| {
        once_counter.fetch_add(1, Ordering::SeqCst);
        if let Some(sub) = handle.lock().unwrap().as_ref() {
            sub.unsubscribe();
        }
    });
    *own.lock().unwrap() = Some(sub);

    let always_counter = always.clone();
    orchestrator.subscribe(move |_| {
        always_counter.fetch_add(1, Ordering::SeqCst);
    });

    orchestrator.toggle_fold(1);
    orchestrator.toggle_fold(2);
    orchestrator.toggle_fold(3);

    assert_eq!(once.load(Ordering::SeqCst), 1);
    assert_eq!(always.load(Ordering::SeqCst), 3);
    assert_eq!(orchestrator.store().subscriber_count(), 1);
}

#[test]
fn versions_advance_once_per_mutation() {
    let mut orchestrator = orchestrator();
    let store = orchestrator.store();
    assert_eq!(store.version(), 0);

    orchestrator.set_test_results(vec![result("t", &[(1, 0), (2, 10)])]);
    orchestrator.set_timeline_time(10);
    orchestrator.step_backward();

    assert_eq!(store.version(), 3);
}
