// ABOUTME: Callback-shaped handles the engine uses to report a pull.
// ABOUTME: Every call becomes an event on the session's relay.

use crate::session::{Event, Outcome, RelaySender};
use crate::types::Percent;

/// Log and progress sinks bound to one session's relay.
///
/// Progress values are clamped into 0..=100 before they are sent. Sending
/// waits only for relay capacity. If the session side has gone away the
/// event is dropped.
#[derive(Debug)]
pub struct PullSinks {
    relay: RelaySender,
}

impl PullSinks {
    pub fn new(relay: RelaySender) -> Self {
        Self { relay }
    }

    /// Emit one free-text log line. A trailing newline is stripped.
    pub async fn log(&self, line: impl Into<String>) {
        let mut line = line.into();
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        self.relay.send(Event::LogLine(line)).await;
    }

    pub async fn layer_progress(&self, value: i64) {
        self.relay
            .send(Event::LayerProgress(Percent::clamped(value)))
            .await;
    }

    pub async fn overall_progress(&self, value: i64) {
        self.relay
            .send(Event::OverallProgress(Percent::clamped(value)))
            .await;
    }

    /// Close the session with its terminal event. Consumes the sinks, so
    /// nothing can follow `Done` on this relay.
    pub(crate) async fn finish(self, outcome: Outcome) {
        self.relay.send(Event::Done(outcome)).await;
    }
}
