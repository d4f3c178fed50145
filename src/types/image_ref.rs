// ABOUTME: Container image reference parsing and validation.
// ABOUTME: Handles formats like alpine, alpine:tag, registry/image:tag@digest.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseImageRefError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0:?}")]
    InvalidChar(char),

    #[error("invalid image reference format: {0}")]
    InvalidFormat(String),
}

/// A non-blank image reference exactly as the user typed it, trimmed.
///
/// Accepting a reference only means it is worth handing to an engine. Engines
/// that need the parts call [`ImageRef::resolve`] and report what they reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    raw: String,
}

impl ImageRef {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageRefError::Empty);
        }
        Ok(Self {
            raw: input.to_string(),
        })
    }

    /// The trimmed reference exactly as entered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Split into registry/name/tag/digest, rejecting malformed references.
    pub fn resolve(&self) -> Result<ImageName, ParseImageRefError> {
        ImageName::parse(&self.raw)
    }
}

/// A well-formed `[registry/]name[:tag][@digest]` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    registry: Option<String>,
    name: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl ImageName {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageRefError::Empty);
        }

        if let Some(c) = input.chars().find(|c| !is_reference_char(*c)) {
            return Err(ParseImageRefError::InvalidChar(c));
        }

        let (without_digest, digest) = match input.split_once('@') {
            Some((before, after)) => (before, Some(after.to_string())),
            None => (input, None),
        };

        // A colon followed by a slash belongs to a registry port, not a tag
        let (without_tag, tag) = match without_digest.rsplit_once(':') {
            Some((before, after)) if !after.contains('/') => (before, Some(after.to_string())),
            _ => (without_digest, None),
        };

        if without_tag.is_empty()
            || without_tag.starts_with('/')
            || without_tag.ends_with('/')
            || matches!(tag.as_deref(), Some(""))
            || matches!(digest.as_deref(), Some(""))
        {
            return Err(ParseImageRefError::InvalidFormat(input.to_string()));
        }

        let (registry, name) = split_registry(without_tag);

        let tag = match (&tag, &digest) {
            (None, None) => Some("latest".to_string()),
            _ => tag,
        };

        Ok(Self {
            registry,
            name,
            tag,
            digest,
        })
    }

    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Fully spelled-out form: `[registry/]name[:tag][@digest]`.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        if let Some(ref registry) = self.registry {
            out.push_str(registry);
            out.push('/');
        }
        out.push_str(&self.name);
        if let Some(ref tag) = self.tag {
            out.push(':');
            out.push_str(tag);
        }
        if let Some(ref digest) = self.digest {
            out.push('@');
            out.push_str(digest);
        }
        out
    }
}

fn is_reference_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '-' | '_' | '@')
}

// The first component is a registry when it looks like a host: it has a dot
// or a port, or is "localhost". Otherwise "library/alpine" is all name.
fn split_registry(input: &str) -> (Option<String>, String) {
    match input.split_once('/') {
        Some((first, rest))
            if first.contains('.') || first.contains(':') || first == "localhost" =>
        {
            (Some(first.to_string()), rest.to_string())
        }
        _ => (None, input.to_string()),
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
