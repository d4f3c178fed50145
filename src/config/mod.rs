// ABOUTME: Configuration types and parsing for pullwatch.yml.
// ABOUTME: Handles YAML parsing, file discovery, and environment overrides.

mod defaults;
mod engine;
mod init;

pub use defaults::{DEFAULT_REGISTRY, PullDefaults};
pub use engine::EngineConfig;
pub use init::init_config;

use crate::error::{Error, Result};
use crate::types::Architecture;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "pullwatch.yml";
pub const CONFIG_FILENAME_ALT: &str = "pullwatch.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".pullwatch/config.yml";

pub const ENV_REGISTRY: &str = "PULLWATCH_REGISTRY";
pub const ENV_ARCH: &str = "PULLWATCH_ARCH";

#[derive(Debug, Clone)]
pub struct Config {
    pub registry: String,
    pub architecture: Architecture,
    pub relay_capacity: usize,
    pub engine: EngineConfig,
}

// File shape before validation; architecture stays text so a bad value is
// reported as invalid configuration rather than a YAML error.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default = "default_registry")]
    registry: String,

    #[serde(default)]
    architecture: Option<String>,

    #[serde(default = "default_relay_capacity")]
    relay_capacity: usize,

    #[serde(default)]
    engine: EngineConfig,
}

fn default_registry() -> String {
    DEFAULT_REGISTRY.to_string()
}

fn default_relay_capacity() -> usize {
    64
}

impl Default for Config {
    fn default() -> Self {
        Config {
            registry: default_registry(),
            architecture: Architecture::default(),
            relay_capacity: default_relay_capacity(),
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        file.validate()
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, or built-in defaults if none exists.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load(path);
            }
        }

        tracing::debug!(dir = %dir.display(), "no config file found, using defaults");
        Ok(Config::default())
    }

    /// Apply `PULLWATCH_REGISTRY` and `PULLWATCH_ARCH` on top of file values.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(registry) = std::env::var(ENV_REGISTRY) {
            let registry = registry.trim();
            if registry.is_empty() {
                return Err(Error::InvalidConfig(format!("{ENV_REGISTRY} is empty")));
            }
            self.registry = registry.to_string();
        }

        if let Ok(arch) = std::env::var(ENV_ARCH) {
            self.architecture = arch
                .parse()
                .map_err(|e| Error::InvalidConfig(format!("{ENV_ARCH}: {e}")))?;
        }

        Ok(self)
    }

    /// Defaults the session controller restores on reset.
    pub fn pull_defaults(&self) -> PullDefaults {
        PullDefaults {
            registry: self.registry.clone(),
            architecture: self.architecture,
        }
    }

}

impl ConfigFile {
    fn validate(self) -> Result<Config> {
        let registry = self.registry.trim().to_string();
        if registry.is_empty() {
            return Err(Error::InvalidConfig("registry cannot be empty".to_string()));
        }
        if self.relay_capacity == 0 {
            return Err(Error::InvalidConfig(
                "relay_capacity must be at least 1".to_string(),
            ));
        }
        let architecture = match self.architecture {
            Some(arch) => arch
                .parse()
                .map_err(|e| Error::InvalidConfig(format!("architecture: {e}")))?,
            None => Architecture::default(),
        };

        Ok(Config {
            registry,
            architecture,
            relay_capacity: self.relay_capacity,
            engine: self.engine,
        })
    }
}
