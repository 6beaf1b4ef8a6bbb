//! Time conversion between the interpreter's native unit and display units.
//!
//! The interpreter records frame times in microseconds. Anything shown to the
//! user goes through [`TimeScale::to_display_time`], which rounds to the
//! nearest display unit using the scale factor the interpreter hands over.

use crate::error::TimelineError;
use crate::types::{Micros, Millis};
use serde::{Deserialize, Serialize};

/// Scale factor between interpreter time and display time.
///
/// No `Default`: the factor belongs to the interpreter
/// and must be passed in from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TimeScale(u64);

impl TimeScale {
    pub fn new(factor: u64) -> Result<Self, TimelineError> {
        if factor == 0 {
            return Err(TimelineError::InvalidScale(factor));
        }
        Ok(Self(factor))
    }

    pub fn factor(self) -> u64 {
        self.0
    }

    /// Convert interpreter microseconds to display milliseconds, rounding
    /// half away from zero.
    pub fn to_display_time(self, micros: Micros) -> Millis {
        let whole = micros / self.0;
        let rem = micros % self.0;
        // rem * 2 >= factor, written so it cannot overflow
        if rem >= self.0 - rem {
            whole + 1
        } else {
            whole
        }
    }
}

impl TryFrom<u64> for TimeScale {
    type Error = TimelineError;

    fn try_from(factor: u64) -> Result<Self, Self::Error> {
        Self::new(factor)
    }
}

impl From<TimeScale> for u64 {
    fn from(scale: TimeScale) -> Self {
        scale.0
    }
}

/// Free-function form of [`TimeScale::to_display_time`].
pub fn to_display_time(micros: Micros, scale: TimeScale) -> Millis {
    scale.to_display_time(micros)
}
