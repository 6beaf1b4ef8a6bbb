//! Timeline Orchestrator
//!
//! Session-scoped coordinator for one exercise attempt. It owns the submitted
//! test results, the selected test, the timeline position, and the folded
//! lines, and republishes a derived [`TimelineSnapshot`] through a [`Store`]
//! after every mutating call.
//!
//! States:
//! - `Idle`: no test results loaded
//! - `Ready`: results loaded and one selected
//!
//! Scrubbing is a run of `Ready` updates, not a separate state. Every mutating
//! call publishes exactly once, after the new state is fully in place.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::{FoldPolicy, SelectionPolicy, SessionConfig};
use crate::cursor;
use crate::error::TimelineError;
use crate::folds::LineFoldSet;
use crate::frame::{Frame, FrameStatus};
use crate::store::{Store, Subscription};
use crate::test_result::TestResult;
use crate::time::TimeScale;
use crate::types::{LineNumber, Micros, Millis, TestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestratorState {
    Idle,
    Ready,
}

/// Derived, read-only view of the orchestrator published to subscribers.
#[derive(Debug, Clone)]
pub struct TimelineSnapshot {
    state: OrchestratorState,
    test_ids: Vec<TestId>,
    current_test: Option<Arc<TestResult>>,
    current_frame_index: Option<usize>,
    current_frame_folded: bool,
    timeline_time: Micros,
    folded_lines: Vec<LineNumber>,
}

impl TimelineSnapshot {
    fn idle(folded_lines: Vec<LineNumber>) -> Self {
        Self {
            state: OrchestratorState::Idle,
            test_ids: Vec::new(),
            current_test: None,
            current_frame_index: None,
            current_frame_folded: false,
            timeline_time: 0,
            folded_lines,
        }
    }

    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    /// Ids of every loaded test, in submission order.
    pub fn test_ids(&self) -> &[TestId] {
        &self.test_ids
    }

    pub fn current_test(&self) -> Option<&Arc<TestResult>> {
        self.current_test.as_ref()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        let index = self.current_frame_index?;
        self.current_test.as_ref()?.frame(index)
    }

    pub fn current_frame_index(&self) -> Option<usize> {
        self.current_frame_index
    }

    /// Whether the current frame sits on a folded line.
    pub fn current_frame_folded(&self) -> bool {
        self.current_frame_folded
    }

    /// Timeline position in interpreter microseconds.
    pub fn timeline_time(&self) -> Micros {
        self.timeline_time
    }

    /// Folded lines in ascending order.
    pub fn folded_lines(&self) -> &[LineNumber] {
        &self.folded_lines
    }

    pub fn display_time(&self, scale: TimeScale) -> Millis {
        scale.to_display_time(self.timeline_time)
    }

    /// Serializable projection with every time already in display units.
    /// Reading it forces the current frame's description.
    pub fn view(&self, scale: TimeScale) -> SnapshotView {
        SnapshotView {
            state: self.state,
            test_ids: self.test_ids.clone(),
            test_id: self.current_test.as_ref().map(|t| t.id().to_string()),
            passed: self.current_test.as_ref().map(|t| t.passed()),
            duration_ms: self
                .current_test
                .as_ref()
                .map(|t| t.display_duration(scale))
                .unwrap_or(0),
            timeline_time_ms: self.display_time(scale),
            frame: self.current_frame().map(|frame| FrameView {
                index: self.current_frame_index.unwrap_or_default(),
                line: frame.line(),
                time_ms: scale.to_display_time(frame.time()),
                status: frame.status(),
                code: frame.code().to_string(),
                description: frame.description().to_string(),
                folded: self.current_frame_folded,
            }),
            folded_lines: self.folded_lines.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotView {
    pub state: OrchestratorState,
    pub test_ids: Vec<TestId>,
    pub test_id: Option<TestId>,
    pub passed: Option<bool>,
    pub duration_ms: Millis,
    pub timeline_time_ms: Millis,
    pub frame: Option<FrameView>,
    pub folded_lines: Vec<LineNumber>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameView {
    pub index: usize,
    pub line: LineNumber,
    pub time_ms: Millis,
    pub status: FrameStatus,
    pub code: String,
    pub description: String,
    pub folded: bool,
}

#[derive(Debug)]
pub struct Orchestrator {
    scale: TimeScale,
    session: SessionConfig,
    results: Vec<Arc<TestResult>>,
    selected: Option<usize>,
    timeline_time: Micros,
    current_frame_index: Option<usize>,
    folds: LineFoldSet,
    store: Store<TimelineSnapshot>,
}

impl Orchestrator {
    /// Create an orchestrator for one exercise attempt with default policies.
    ///
    /// `scale` must come from the interpreter that produced the frames.
    pub fn new(scale: TimeScale) -> Self {
        Self::with_config(scale, SessionConfig::default())
    }

    pub fn with_config(scale: TimeScale, session: SessionConfig) -> Self {
        Self {
            scale,
            session,
            results: Vec::new(),
            selected: None,
            timeline_time: 0,
            current_frame_index: None,
            folds: LineFoldSet::new(),
            store: Store::new(TimelineSnapshot::idle(Vec::new())),
        }
    }

    pub fn state(&self) -> OrchestratorState {
        if self.selected.is_some() {
            OrchestratorState::Ready
        } else {
            OrchestratorState::Idle
        }
    }

    pub fn time_scale(&self) -> TimeScale {
        self.scale
    }

    pub fn session_config(&self) -> SessionConfig {
        self.session
    }

    /// Replace the available results and reset the timeline position to 0.
    ///
    /// The selection follows [`SelectionPolicy`]; an empty list returns the
    /// orchestrator to `Idle`.
    pub fn set_test_results(&mut self, results: Vec<TestResult>) {
        let previous_id = self.current_test().map(|t| t.id().to_string());

        self.results = results.into_iter().map(Arc::new).collect();
        self.selected = match (self.session.selection, previous_id) {
            (SelectionPolicy::PreserveById, Some(id)) => {
                self.position_of(&id).or_else(|| self.first_index())
            }
            _ => self.first_index(),
        };

        info!(
            results = self.results.len(),
            selected = self.current_test().map(|t| t.id()).unwrap_or("none"),
            policy = self.session.selection.as_str(),
            "Test results submitted"
        );
        self.seek(0);
        self.publish();
    }

    /// Make the test with `id` current and reset the timeline position to 0.
    ///
    /// Fails with [`TimelineError::TestNotFound`] and leaves state untouched if
    /// no such test is loaded.
    pub fn select_test(&mut self, id: &str) -> Result<(), TimelineError> {
        let Some(index) = self.position_of(id) else {
            warn!(test_id = id, "Cannot select unknown test");
            return Err(TimelineError::TestNotFound(id.to_string()));
        };

        debug!(test_id = id, "Test selected");
        self.selected = Some(index);
        self.seek(0);
        self.publish();
        Ok(())
    }

    /// Move the timeline to `position`, clamped to the current test's duration.
    ///
    /// Without a selected test the position stays at 0; subscribers are
    /// notified either way.
    pub fn set_timeline_time(&mut self, position: Micros) {
        self.seek(position);
        self.publish();
    }

    /// Jump to the next distinct frame timestamp. Returns false at the end.
    pub fn step_forward(&mut self) -> bool {
        let target = self
            .current_test()
            .and_then(|t| cursor::next_frame_time(t.frames(), self.timeline_time));
        self.step_to(target)
    }

    /// Jump to the previous distinct frame timestamp. Returns false at the start.
    pub fn step_backward(&mut self) -> bool {
        let target = self
            .current_test()
            .and_then(|t| cursor::previous_frame_time(t.frames(), self.timeline_time));
        self.step_to(target)
    }

    /// Fold or unfold `line`. Returns whether the line is folded afterwards.
    pub fn toggle_fold(&mut self, line: LineNumber) -> bool {
        let folded = self.folds.toggle(line);
        debug!(line, folded, "Line fold toggled");
        self.publish();
        folded
    }

    pub fn clear_folds(&mut self) {
        self.folds.clear();
        debug!("Line folds cleared");
        self.publish();
    }

    /// Start a new exercise attempt: drop all results and return to `Idle`.
    /// Folded lines are kept or cleared according to [`FoldPolicy`].
    pub fn begin_attempt(&mut self) {
        self.results.clear();
        self.selected = None;
        if self.session.fold_policy == FoldPolicy::ResetOnNewAttempt {
            self.folds.clear();
        }
        info!(
            fold_policy = self.session.fold_policy.as_str(),
            folded = self.folds.len(),
            "New attempt started"
        );
        self.seek(0);
        self.publish();
    }

    pub fn test_results(&self) -> &[Arc<TestResult>] {
        &self.results
    }

    pub fn current_test(&self) -> Option<&Arc<TestResult>> {
        self.selected.and_then(|i| self.results.get(i))
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        let index = self.current_frame_index?;
        self.current_test()?.frame(index)
    }

    pub fn timeline_time(&self) -> Micros {
        self.timeline_time
    }

    /// Timeline position in display units.
    pub fn display_time(&self) -> Millis {
        self.scale.to_display_time(self.timeline_time)
    }

    /// Duration of the current test in display units, 0 without one.
    pub fn display_duration(&self) -> Millis {
        self.current_test()
            .map(|t| t.display_duration(self.scale))
            .unwrap_or(0)
    }

    pub fn folds(&self) -> &LineFoldSet {
        &self.folds
    }

    pub fn is_folded(&self, line: LineNumber) -> bool {
        self.folds.is_folded(line)
    }

    pub fn folded_lines(&self) -> Vec<LineNumber> {
        self.folds.folded_lines()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<TimelineSnapshot>) + Send + Sync + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn get_snapshot(&self) -> Arc<TimelineSnapshot> {
        self.store.get_snapshot()
    }

    /// Shared handle to the underlying store, for consumers that outlive a
    /// borrow of the orchestrator.
    pub fn store(&self) -> Store<TimelineSnapshot> {
        self.store.clone()
    }

    fn step_to(&mut self, target: Option<Micros>) -> bool {
        match target {
            Some(position) => {
                self.seek(position);
                self.publish();
                true
            }
            None => {
                self.publish();
                false
            }
        }
    }

    fn seek(&mut self, position: Micros) {
        let (clamped, index) = match self.current_test() {
            Some(test) => {
                let clamped = position.min(test.duration());
                (clamped, cursor::resolve_index(test.frames(), clamped))
            }
            None => (0, None),
        };
        trace!(requested = position, clamped, frame = ?index, "Timeline moved");

        self.timeline_time = clamped;
        self.current_frame_index = index;
    }

    fn publish(&self) {
        let Some(test) = self.current_test() else {
            let mut snapshot = TimelineSnapshot::idle(self.folds.folded_lines());
            snapshot.test_ids = self.test_ids();
            self.store.publish(snapshot);
            return;
        };

        let current_frame_folded = self
            .current_frame()
            .map(|frame| !cursor::is_visible(frame, &self.folds))
            .unwrap_or(false);

        self.store.publish(TimelineSnapshot {
            state: OrchestratorState::Ready,
            test_ids: self.test_ids(),
            current_test: Some(test.clone()),
            current_frame_index: self.current_frame_index,
            current_frame_folded,
            timeline_time: self.timeline_time,
            folded_lines: self.folds.folded_lines(),
        });
    }

    fn test_ids(&self) -> Vec<TestId> {
        self.results.iter().map(|t| t.id().to_string()).collect()
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.results.iter().position(|t| t.id() == id)
    }

    fn first_index(&self) -> Option<usize> {
        if self.results.is_empty() {
            None
        } else {
            Some(0)
        }
    }
}
