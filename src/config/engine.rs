// ABOUTME: Engine connection settings for the local container daemon.
// ABOUTME: Optional explicit socket path and request timeout.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Explicit daemon socket (defaults to the platform's local socket).
    #[serde(default)]
    pub socket: Option<String>,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            socket: None,
            timeout: default_timeout(),
        }
    }
}
