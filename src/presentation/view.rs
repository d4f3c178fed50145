// ABOUTME: Incremental renderer from session state to output.
// ABOUTME: Prints only what changed since the last render.

use crate::output::Output;
use crate::session::{PullSession, SessionState};
use crate::types::Percent;

#[derive(Debug, Default)]
pub struct SessionView {
    generation: u64,
    lines_shown: usize,
    progress: (Percent, Percent),
    state: SessionState,
}

impl SessionView {
    /// Print what changed. Returns the new state if the state changed.
    pub fn render(&mut self, session: &PullSession, output: &Output) -> Option<SessionState> {
        if session.generation() != self.generation {
            self.generation = session.generation();
            self.lines_shown = 0;
        }

        for line in &session.log()[self.lines_shown.min(session.log().len())..] {
            output.log_line(line);
        }
        self.lines_shown = session.log().len();

        let progress = (session.layer_progress(), session.overall_progress());
        if progress != self.progress {
            self.progress = progress;
            if session.state() == SessionState::Running {
                output.progress(progress.0, progress.1);
            }
        }

        if session.state() == self.state {
            return None;
        }
        self.state = session.state();
        output.state(self.state);
        Some(self.state)
    }
}
