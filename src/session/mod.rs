// ABOUTME: Pull session lifecycle: request validation, event relay, worker, controller.
// ABOUTME: All session state is mutated by whoever drains the relay, never by the worker.

mod controller;
mod error;
mod event;
mod relay;
mod request;
mod state;
mod worker;

pub use controller::SessionController;
pub use error::SessionError;
pub use event::{Event, Outcome};
pub use relay::{RelayReceiver, RelaySender, channel};
pub use request::{PullInputs, PullRequest};
pub use state::{PullSession, SessionState};

/// First log line of every session.
pub fn start_line(image: &crate::types::ImageRef) -> String {
    format!("starting pull of {}", image)
}

/// Log line appended when the engine succeeds.
pub const COMPLETE_LINE: &str = "pull complete";

/// Log line appended when the engine fails.
pub fn error_line(message: &str) -> String {
    format!("error: {}", message)
}
