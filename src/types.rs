//! Core type aliases shared across the timeline modules.

/// Interpreter-native time unit (microseconds).
pub type Micros = u64;

/// Display time unit (milliseconds).
pub type Millis = u64;

/// 1-based source line number.
pub type LineNumber = u32;

/// Identifier of a single executed test.
pub type TestId = String;
