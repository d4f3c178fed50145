// ABOUTME: Errors returned synchronously by the session controller.
// ABOUTME: Validation failures, single-flight rejections, and worker spawn failures.

use crate::types::ParseImageRefError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The request was rejected before any worker was spawned.
    #[error("invalid request: {0}")]
    Validation(#[from] ParseImageRefError),

    /// A pull is already running.
    #[error("a pull is already running")]
    Busy,

    /// The worker thread could not be created. The session is unchanged.
    #[error("could not start pull worker: {0}")]
    Spawn(String),
}
