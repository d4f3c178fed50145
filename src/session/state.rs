// ABOUTME: Session state machine states and the session's observable data.
// ABOUTME: Idle -> Running -> Succeeded | Failed -> Idle (via reset).

use super::event::{Event, Outcome};
use super::request::PullRequest;
use crate::types::Percent;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl SessionState {
    /// Every state except `Running` allows a new start or a reset.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::Running)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Running => write!(f, "running"),
            SessionState::Succeeded => write!(f, "succeeded"),
            SessionState::Failed => write!(f, "failed"),
        }
    }
}

/// Log, progress and state of the current (or last) pull.
#[derive(Debug, Clone, Default)]
pub struct PullSession {
    state: SessionState,
    log: Vec<String>,
    layer_progress: Percent,
    overall_progress: Percent,
    request: Option<PullRequest>,
    generation: u64,
}

impl PullSession {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn layer_progress(&self) -> Percent {
        self.layer_progress
    }

    pub fn overall_progress(&self) -> Percent {
        self.overall_progress
    }

    /// Request of the running or most recent session, if any.
    pub fn request(&self) -> Option<&PullRequest> {
        self.request.as_ref()
    }

    /// Bumped whenever the log is cleared, so renderers know to start over.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(super) fn begin(&mut self, request: PullRequest, first_line: String) {
        self.clear();
        self.log.push(first_line);
        self.request = Some(request);
        self.state = SessionState::Running;
    }

    pub(super) fn reset(&mut self) {
        self.clear();
        self.request = None;
        self.state = SessionState::Idle;
    }

    /// Apply one relay event. Returns false if it was ignored because no
    /// session is running.
    pub(super) fn apply(&mut self, event: Event) -> bool {
        if self.state != SessionState::Running {
            return false;
        }

        match event {
            Event::LogLine(line) => self.log.push(line),
            Event::LayerProgress(value) => self.layer_progress = value,
            Event::OverallProgress(value) => self.overall_progress = value,
            Event::Done(outcome) => self.finish(outcome),
        }
        true
    }

    fn finish(&mut self, outcome: Outcome) {
        self.layer_progress = Percent::ZERO;
        self.overall_progress = Percent::ZERO;
        match outcome {
            Outcome::Success => {
                self.log.push(super::COMPLETE_LINE.to_string());
                self.state = SessionState::Succeeded;
            }
            Outcome::Failure(message) => {
                self.log.push(super::error_line(&message));
                self.state = SessionState::Failed;
            }
        }
    }

    fn clear(&mut self) {
        self.log.clear();
        self.layer_progress = Percent::ZERO;
        self.overall_progress = Percent::ZERO;
        self.generation += 1;
    }
}
