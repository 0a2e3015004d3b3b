// ABOUTME: Application-wide error types for retag-push.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::runtime::{DetectionError, ImageError};
use crate::types::{ParseImageRefError, ServiceListError, ServiceName};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("REPOSITORY_PREFIX is not set or empty")]
    MissingRegistryPrefix,

    #[error("{0}")]
    RuntimeNotFound(#[from] DetectionError),

    #[error("{} source image(s) missing: {}", .0.len(), join_names(.0))]
    MissingSourceImages(Vec<ServiceName>),

    #[error("{0} image(s) failed to retag")]
    RetagFailed(usize),

    #[error("invalid image reference: {0}")]
    ImageRef(#[from] ParseImageRefError),

    #[error("invalid service list: {0}")]
    ServiceList(#[from] ServiceListError),

    #[error("image operation failed: {0}")]
    Image(#[from] ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn join_names(names: &[ServiceName]) -> String {
    names
        .iter()
        .map(ServiceName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
