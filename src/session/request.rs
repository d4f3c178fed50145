// ABOUTME: Editable pull form and the validated request built from it.
// ABOUTME: Validation happens synchronously, before any worker exists.

use crate::config::PullDefaults;
use crate::types::{Architecture, ImageRef, ParseImageRefError};

/// The form a user fills in: free-text image, registry, and architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullInputs {
    pub image: String,
    pub registry: String,
    pub architecture: Architecture,
}

impl PullInputs {
    /// Blank image with the configured registry and architecture.
    pub fn from_defaults(defaults: &PullDefaults) -> Self {
        Self {
            image: String::new(),
            registry: defaults.registry.clone(),
            architecture: defaults.architecture,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

impl Default for PullInputs {
    fn default() -> Self {
        Self::from_defaults(&PullDefaults::default())
    }
}

/// Immutable description of one pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    image: ImageRef,
    registry: String,
    architecture: Architecture,
}

impl PullRequest {
    /// Validate the form. A blank registry falls back to the default one.
    pub fn from_inputs(
        inputs: &PullInputs,
        defaults: &PullDefaults,
    ) -> Result<Self, ParseImageRefError> {
        let image = ImageRef::parse(&inputs.image)?;
        let registry = match inputs.registry.trim() {
            "" => defaults.registry.clone(),
            registry => registry.to_string(),
        };

        Ok(Self {
            image,
            registry,
            architecture: inputs.architecture,
        })
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn registry(&self) -> &str {
        &self.registry
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }
}
