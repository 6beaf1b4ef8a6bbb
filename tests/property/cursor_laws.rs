//! Frame resolution laws over arbitrary sorted frame sequences.

use exec_timeline::cursor::{resolve_frame, resolve_index};
use exec_timeline::types::Micros;
use exec_timeline::Frame;
use proptest::prelude::*;

/// Non-decreasing times; lines encode the original index so frames are
/// distinguishable.
fn sorted_frames(max_len: usize) -> impl Strategy<Value = Vec<Frame>> {
    prop::collection::vec(0u64..5_000, 1..max_len).prop_map(|mut times| {
        times.sort_unstable();
        times
            .into_iter()
            .enumerate()
            .map(|(i, t)| Frame::builder(i as u32 + 1, t).build().unwrap())
            .collect()
    })
}

fn naive_index(frames: &[Frame], position: Micros) -> usize {
    frames
        .iter()
        .rposition(|f| f.time() <= position)
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn before_first_frame_resolves_to_first(frames in sorted_frames(64), offset in 1u64..1_000) {
        let first = frames[0].time();
        let position = first.saturating_sub(offset);
        prop_assume!(position < first);
        prop_assert_eq!(resolve_index(&frames, position), Some(0));
    }

    #[test]
    fn zero_resolves_to_first_when_it_starts_alone(frames in sorted_frames(64)) {
        prop_assume!(frames.len() < 2 || frames[1].time() > frames[0].time() || frames[0].time() > 0);
        prop_assert_eq!(resolve_index(&frames, 0), Some(0));
    }

    #[test]
    fn past_the_end_resolves_to_last(frames in sorted_frames(64), extra in 0u64..10_000) {
        let last = frames.len() - 1;
        let position = frames[last].time() + extra;
        prop_assert_eq!(resolve_index(&frames, position), Some(last));
    }

    #[test]
    fn matches_linear_scan(frames in sorted_frames(128), position in 0u64..6_000) {
        let expected = naive_index(&frames, position);
        let found = resolve_frame(&frames, position).map(Frame::line);
        prop_assert_eq!(found, Some(expected as u32 + 1));
    }

    #[test]
    fn ties_resolve_to_latest(frames in sorted_frames(64), pick in any::<prop::sample::Index>()) {
        let i = pick.index(frames.len());
        let time = frames[i].time();
        let latest = frames.iter().rposition(|f| f.time() == time).unwrap();
        prop_assert_eq!(resolve_index(&frames, time), Some(latest));
    }
}

#[test]
fn empty_sequence_resolves_to_none() {
    assert!(resolve_frame(&[], 0).is_none());
    assert!(resolve_frame(&[], Micros::MAX).is_none());
}
