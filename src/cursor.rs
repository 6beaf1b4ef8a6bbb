//! Timeline Cursor
//!
//! Resolves "which frame is current at timeline position T" over a frame
//! sequence sorted by time. Lookups are binary searches; the UI calls these on
//! every scrub tick and a single test can record thousands of frames.
//!
//! Rules:
//! - empty sequence: no frame
//! - the current frame is the last frame whose time is <= the position, so
//!   when several frames share a timestamp the latest one in sequence wins
//! - a position before the first frame resolves to the first frame
//!
//! Everything here is pure; state lives in the orchestrator.

use crate::folds::LineFoldSet;
use crate::frame::Frame;
use crate::types::Micros;

/// Index of the current frame at `position`.
pub fn resolve_index(frames: &[Frame], position: Micros) -> Option<usize> {
    if frames.is_empty() {
        return None;
    }
    let after = frames.partition_point(|f| f.time() <= position);
    Some(after.saturating_sub(1))
}

/// Current frame at `position`.
pub fn resolve_frame(frames: &[Frame], position: Micros) -> Option<&Frame> {
    resolve_index(frames, position).map(|index| &frames[index])
}

/// Time of the next distinct timestamp after the frame shown at `position`.
pub fn next_frame_time(frames: &[Frame], position: Micros) -> Option<Micros> {
    let current = resolve_frame(frames, position)?.time();
    let anchor = position.max(current);
    let index = frames.partition_point(|f| f.time() <= anchor);
    frames.get(index).map(Frame::time)
}

/// Time of the previous distinct timestamp before the frame shown at `position`.
pub fn previous_frame_time(frames: &[Frame], position: Micros) -> Option<Micros> {
    let current = resolve_frame(frames, position)?.time();
    let index = frames.partition_point(|f| f.time() < current);
    index.checked_sub(1).map(|i| frames[i].time())
}

pub fn is_visible(frame: &Frame, folds: &LineFoldSet) -> bool {
    !folds.is_folded(frame.line())
}

/// Frames whose line is not folded, in sequence order.
pub fn visible_frames<'a>(
    frames: &'a [Frame],
    folds: &'a LineFoldSet,
) -> impl Iterator<Item = &'a Frame> + 'a {
    frames.iter().filter(move |f| is_visible(f, folds))
}
