// ABOUTME: Target CPU architecture for an image pull.
// ABOUTME: Fixed set of amd64, arm64, arm, i386 with OCI platform mapping.

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown architecture: {0} (expected one of amd64, arm64, arm, i386)")]
pub struct ParseArchitectureError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Architecture {
    #[default]
    Amd64,
    Arm64,
    Arm,
    I386,
}

impl Architecture {
    pub const ALL: [Architecture; 4] = [
        Architecture::Amd64,
        Architecture::Arm64,
        Architecture::Arm,
        Architecture::I386,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "amd64",
            Architecture::Arm64 => "arm64",
            Architecture::Arm => "arm",
            Architecture::I386 => "i386",
        }
    }

    /// OCI platform string understood by registries and the daemon.
    pub fn platform(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "linux/amd64",
            Architecture::Arm64 => "linux/arm64",
            Architecture::Arm => "linux/arm",
            Architecture::I386 => "linux/386",
        }
    }
}

impl FromStr for Architecture {
    type Err = ParseArchitectureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|arch| arch.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseArchitectureError(s.to_string()))
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
