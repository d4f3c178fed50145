// ABOUTME: Default form values for a pull request.
// ABOUTME: Passed explicitly into the session controller instead of living in globals.

use crate::types::Architecture;

pub const DEFAULT_REGISTRY: &str = "registry.hub.docker.com";

/// Registry and architecture a fresh or reset session starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullDefaults {
    pub registry: String,
    pub architecture: Architecture,
}

impl Default for PullDefaults {
    fn default() -> Self {
        PullDefaults {
            registry: DEFAULT_REGISTRY.to_string(),
            architecture: Architecture::default(),
        }
    }
}
