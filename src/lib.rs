//! Exec Timeline: scrubbable execution timelines
//!
//! Takes the per-test frame sequences an interpreter records while running a
//! student's code and exposes them as a continuous, scrubbable time axis. The
//! [`Orchestrator`] resolves the frame current at any position, tracks folded
//! source lines, and republishes its state through an observable [`Store`] so
//! a UI can re-render on change.

pub mod config;
pub mod cursor;
pub mod error;
pub mod folds;
pub mod frame;
pub mod logging;
pub mod orchestrator;
pub mod store;
pub mod test_result;
pub mod time;
pub mod types;

pub use error::TimelineError;
pub use folds::LineFoldSet;
pub use frame::{Frame, FrameStatus};
pub use orchestrator::{Orchestrator, OrchestratorState, TimelineSnapshot};
pub use store::{Store, Subscription};
pub use test_result::{TestOutcome, TestResult};
pub use time::TimeScale;
