// ABOUTME: The pull engine contract and its concrete Docker implementation.
// ABOUTME: Engines report through PullSinks and return a typed error on failure.

mod docker;
mod progress;
mod sinks;

pub use docker::{DockerEngine, qualified_reference};
pub use progress::{LayerTracker, ProgressUpdate};
pub use sinks::PullSinks;

use crate::session::PullRequest;
use crate::types::ParseImageRefError;
use async_trait::async_trait;

/// Performs one image pull, reporting log lines and progress through `sinks`.
///
/// Implementations may call the sinks any number of times and in any order.
/// The sinks are only borrowed, so nothing can be reported once `pull` returns.
///
/// Each pull runs on its own worker thread with a dedicated runtime, so a
/// blocking implementation stalls only its own session.
#[async_trait]
pub trait Engine: Send + Sync + 'static {
    async fn pull(&self, request: &PullRequest, sinks: &PullSinks) -> Result<(), EngineError>;
}

/// Errors from an engine. The session layer only uses the display text.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    InvalidReference(#[from] ParseImageRefError),

    #[error("cannot reach container daemon: {0}")]
    Connection(String),

    #[error("image not found: {0}")]
    NotFound(String),

    #[error("authentication failed for registry: {0}")]
    AuthenticationFailed(String),

    #[error("pull failed: {0}")]
    PullFailed(String),

    #[error("{0}")]
    Other(String),
}
