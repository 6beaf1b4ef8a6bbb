//! Orchestrator notification and clamping laws under random operation sequences.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use exec_timeline::{Frame, Orchestrator, TestOutcome, TestResult, TimeScale};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Scrub(u64),
    Fold(u32),
    Select(usize),
    StepForward,
    StepBackward,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..10_000).prop_map(Op::Scrub),
        (1u32..10).prop_map(Op::Fold),
        (0usize..3).prop_map(Op::Select),
        Just(Op::StepForward),
        Just(Op::StepBackward),
    ]
}

fn results() -> Vec<TestResult> {
    let build = |id: &str, times: &[u64]| {
        let frames = times
            .iter()
            .enumerate()
            .map(|(i, &t)| Frame::builder(i as u32 + 1, t).build().unwrap())
            .collect();
        TestResult::new(id, frames, TestOutcome::Passed).unwrap()
    };
    vec![
        build("a", &[0, 1000, 1000, 2500]),
        build("b", &[300, 400, 4000]),
    ]
}

proptest! {
    #[test]
    fn each_operation_notifies_once_with_fresh_state(ops in prop::collection::vec(op(), 1..40)) {
        let mut orchestrator = Orchestrator::new(TimeScale::new(1000).unwrap());
        orchestrator.set_test_results(results());

        let store = orchestrator.store();
        let calls = Arc::new(AtomicUsize::new(0));
        let stale = Arc::new(Mutex::new(false));
        let (counter, flag) = (calls.clone(), stale.clone());
        orchestrator.subscribe(move |snapshot| {
            counter.fetch_add(1, Ordering::SeqCst);
            if !Arc::ptr_eq(snapshot, &store.get_snapshot()) {
                *flag.lock().unwrap() = true;
            }
        });

        let mut expected = 0usize;
        for op in &ops {
            match op {
                Op::Scrub(t) => orchestrator.set_timeline_time(*t),
                Op::Fold(line) => {
                    orchestrator.toggle_fold(*line);
                }
                Op::Select(i) => {
                    let id = ["a", "b", "missing"][*i];
                    if orchestrator.select_test(id).is_err() {
                        continue;
                    }
                }
                Op::StepForward => {
                    orchestrator.step_forward();
                }
                Op::StepBackward => {
                    orchestrator.step_backward();
                }
            }
            expected += 1;

            let snapshot = orchestrator.get_snapshot();
            let test = snapshot.current_test().unwrap();
            prop_assert!(snapshot.timeline_time() <= test.duration());
            prop_assert!(snapshot.current_frame().is_some());
            prop_assert_eq!(snapshot.timeline_time(), orchestrator.timeline_time());
        }

        prop_assert_eq!(calls.load(Ordering::SeqCst), expected);
        prop_assert!(!*stale.lock().unwrap());
    }
}
