// ABOUTME: Messages carried from the pull worker to the presentation loop.
// ABOUTME: Done is always the final event of a session.

use crate::types::Percent;

/// Terminal result of one engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    LogLine(String),
    LayerProgress(Percent),
    OverallProgress(Percent),
    Done(Outcome),
}

impl Event {
    pub fn is_done(&self) -> bool {
        matches!(self, Event::Done(_))
    }
}
