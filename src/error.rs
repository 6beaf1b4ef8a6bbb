//! Error types for the execution timeline.

use crate::types::{LineNumber, Micros, TestId};
use thiserror::Error;

/// Timeline-related errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("Test not found: {0}")]
    TestNotFound(TestId),

    #[error("Frame {index} goes back in time: {time}us after {previous}us")]
    UnorderedFrames {
        index: usize,
        previous: Micros,
        time: Micros,
    },

    #[error("Invalid line number: {0} (lines are 1-based)")]
    InvalidLine(LineNumber),

    #[error("Invalid time scale factor: {0} (must be non-zero)")]
    InvalidScale(u64),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for TimelineError {
    fn from(err: config::ConfigError) -> Self {
        TimelineError::ConfigError(err.to_string())
    }
}
