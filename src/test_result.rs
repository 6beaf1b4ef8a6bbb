//! Test Results
//!
//! The full, ordered frame sequence recorded for one executed test, plus its
//! outcome. Results are immutable once built; the interpreter hands over a
//! complete run, never an incremental stream.

use crate::error::TimelineError;
use crate::frame::Frame;
use crate::time::TimeScale;
use crate::types::{Micros, Millis, TestId};
use serde::{Deserialize, Serialize};

/// Pass/fail outcome of a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestOutcome {
    Passed,
    Failed,
}

#[derive(Debug, Clone)]
pub struct TestResult {
    id: TestId,
    frames: Vec<Frame>,
    outcome: TestOutcome,
}

impl TestResult {
    /// Build a result from frames in execution order.
    ///
    /// Frame times must be non-decreasing; equal times are allowed and keep
    /// their order.
    pub fn new(
        id: impl Into<TestId>,
        frames: Vec<Frame>,
        outcome: TestOutcome,
    ) -> Result<Self, TimelineError> {
        if let Some(index) = frames.windows(2).position(|w| w[1].time() < w[0].time()) {
            return Err(TimelineError::UnorderedFrames {
                index: index + 1,
                previous: frames[index].time(),
                time: frames[index + 1].time(),
            });
        }

        Ok(Self {
            id: id.into(),
            frames,
            outcome,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn outcome(&self) -> TestOutcome {
        self.outcome
    }

    pub fn passed(&self) -> bool {
        self.outcome == TestOutcome::Passed
    }

    /// Time of the last frame, or 0 when nothing executed.
    pub fn duration(&self) -> Micros {
        self.frames.last().map(Frame::time).unwrap_or(0)
    }

    pub fn display_duration(&self, scale: TimeScale) -> Millis {
        scale.to_display_time(self.duration())
    }

    /// First frame that recorded an error, if any.
    pub fn error_frame(&self) -> Option<&Frame> {
        self.frames.iter().find(|f| f.status().is_error())
    }
}
