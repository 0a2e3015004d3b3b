// ABOUTME: Container image reference parsing, composition and validation.
// ABOUTME: Handles formats like app, app:tag, registry:port/ns/app:tag@digest.

use super::ServiceName;
use std::fmt;
use thiserror::Error;

/// Tag applied by container runtimes when a reference carries none.
pub const DEFAULT_TAG: &str = "latest";

#[derive(Debug, Error)]
pub enum ParseImageRefError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0}")]
    InvalidChar(char),

    #[error("invalid image reference format: {0}")]
    InvalidFormat(String),

    #[error("invalid tag in image reference: {0:?}")]
    InvalidTag(String),

    #[error("registry prefix cannot be empty")]
    EmptyPrefix,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    registry: Option<String>,
    name: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl ImageRef {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageRefError::Empty);
        }

        for c in input.chars() {
            if !c.is_ascii_alphanumeric()
                && c != '/'
                && c != ':'
                && c != '.'
                && c != '-'
                && c != '_'
                && c != '@'
            {
                return Err(ParseImageRefError::InvalidChar(c));
            }
        }

        let (without_digest, digest) = match input.split_once('@') {
            Some((before, after)) => (before, Some(after.to_string())),
            None => (input, None),
        };

        // A colon followed by a slash belongs to a registry port, not a tag.
        let (without_tag, tag) = match without_digest.rsplit_once(':') {
            Some((_, after)) if after.contains('/') => (without_digest, None),
            Some((before, after)) => {
                validate_tag(after)?;
                (before, Some(after.to_string()))
            }
            None => (without_digest, None),
        };

        let (registry, name) = Self::parse_registry_and_name(without_tag)?;

        Ok(Self {
            registry,
            name,
            tag,
            digest,
        })
    }

    /// Build `<prefix>/<service>[:<tag>]` and validate the result.
    ///
    /// The prefix may be a bare registry (`localhost:5001`) or a registry
    /// with a namespace (`localhost/springcommunity`).
    pub fn compose(
        prefix: &str,
        service: &ServiceName,
        tag: Option<&str>,
    ) -> Result<Self, ParseImageRefError> {
        let prefix = prefix.trim().trim_end_matches('/');
        if prefix.is_empty() {
            return Err(ParseImageRefError::EmptyPrefix);
        }

        let reference = match tag {
            Some(tag) => format!("{prefix}/{service}:{tag}"),
            None => format!("{prefix}/{service}"),
        };
        let parsed = Self::parse(&reference)?;

        // A tag-looking prefix ("host/app:1") would otherwise swallow the service.
        if !parsed.name.ends_with(service.as_str()) || parsed.tag.as_deref() != tag {
            return Err(ParseImageRefError::InvalidFormat(reference));
        }

        Ok(parsed)
    }

    fn parse_registry_and_name(
        input: &str,
    ) -> Result<(Option<String>, String), ParseImageRefError> {
        let parts: Vec<&str> = input.splitn(2, '/').collect();

        let (registry, name) = match parts.as_slice() {
            [name] => (None, (*name).to_string()),
            [first, rest] => {
                if first.contains('.') || first.contains(':') || *first == "localhost" {
                    (Some((*first).to_string()), (*rest).to_string())
                } else {
                    (None, input.to_string())
                }
            }
            _ => return Err(ParseImageRefError::InvalidFormat(input.to_string())),
        };

        if name.contains(':') || name.split('/').any(str::is_empty) {
            return Err(ParseImageRefError::InvalidFormat(input.to_string()));
        }
        if registry.as_deref().is_some_and(str::is_empty) {
            return Err(ParseImageRefError::InvalidFormat(input.to_string()));
        }

        Ok((registry, name))
    }

    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The explicit tag, if the reference carries one.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// The tag a runtime resolves this reference to.
    pub fn effective_tag(&self) -> &str {
        self.tag.as_deref().unwrap_or(DEFAULT_TAG)
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}

fn validate_tag(tag: &str) -> Result<(), ParseImageRefError> {
    let valid = !tag.is_empty()
        && tag.len() <= 128
        && !tag.starts_with(['.', '-'])
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(ParseImageRefError::InvalidTag(tag.to_string()))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref registry) = self.registry {
            write!(f, "{}/", registry)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(ref tag) = self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(ref digest) = self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}
