//! Execution Frames
//!
//! Immutable snapshots of program execution produced by the interpreter.
//! A frame records where execution was (`line`), when (`time`, in interpreter
//! microseconds), and how it went (`status`). Everything else is carried for
//! the renderer and never inspected here.

pub mod description;
pub mod payload;

pub use description::LazyDescription;
pub use payload::{ExecutionContext, FrameData, FrameResult};

use crate::error::TimelineError;
use crate::types::{LineNumber, Micros};
use serde::{Deserialize, Serialize};

/// Execution outcome at a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameStatus {
    Success,
    Error,
}

impl FrameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameStatus::Success => "SUCCESS",
            FrameStatus::Error => "ERROR",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, FrameStatus::Error)
    }
}

/// Execution frame
#[derive(Debug, Clone)]
pub struct Frame {
    line: LineNumber,
    time: Micros,
    status: FrameStatus,
    code: String,
    description: LazyDescription,
    result: Option<FrameResult>,
    data: FrameData,
    context: Option<ExecutionContext>,
}

impl Frame {
    /// Start building a frame at `line` and `time` (microseconds).
    pub fn builder(line: LineNumber, time: Micros) -> FrameBuilder {
        FrameBuilder::new(line, time)
    }

    pub fn line(&self) -> LineNumber {
        self.line
    }

    pub fn time(&self) -> Micros {
        self.time
    }

    pub fn status(&self) -> FrameStatus {
        self.status
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable description; produced on first access.
    pub fn description(&self) -> &str {
        self.description.get()
    }

    pub fn lazy_description(&self) -> &LazyDescription {
        &self.description
    }

    pub fn result(&self) -> Option<&FrameResult> {
        self.result.as_ref()
    }

    pub fn data(&self) -> &FrameData {
        &self.data
    }

    pub fn context(&self) -> Option<&ExecutionContext> {
        self.context.as_ref()
    }
}

/// Builder used by the interpreter side to assemble frames.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    line: LineNumber,
    time: Micros,
    status: FrameStatus,
    code: String,
    description: LazyDescription,
    result: Option<FrameResult>,
    data: FrameData,
    context: Option<ExecutionContext>,
}

impl FrameBuilder {
    pub fn new(line: LineNumber, time: Micros) -> Self {
        Self {
            line,
            time,
            status: FrameStatus::Success,
            code: String::new(),
            description: LazyDescription::default(),
            result: None,
            data: FrameData::new(),
            context: None,
        }
    }

    pub fn status(mut self, status: FrameStatus) -> Self {
        self.status = status;
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Attach a description producer; it runs at most once, on first read.
    pub fn describe_with<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.description = LazyDescription::new(producer);
        self
    }

    pub fn description(mut self, description: LazyDescription) -> Self {
        self.description = description;
        self
    }

    pub fn result(mut self, result: FrameResult) -> Self {
        self.result = Some(result);
        self
    }

    pub fn data(mut self, data: FrameData) -> Self {
        self.data = data;
        self
    }

    pub fn context(mut self, context: ExecutionContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn build(self) -> Result<Frame, TimelineError> {
        if self.line == 0 {
            return Err(TimelineError::InvalidLine(self.line));
        }

        Ok(Frame {
            line: self.line,
            time: self.time,
            status: self.status,
            code: self.code,
            description: self.description,
            result: self.result,
            data: self.data,
            context: self.context,
        })
    }
}
