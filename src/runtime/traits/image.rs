// ABOUTME: Image operations trait for container runtimes.
// ABOUTME: Check existence, tag, push, and remove container images.

use super::shared_types::PushOptions;
use crate::runtime::error::CommandError;
use crate::types::ImageRef;
use async_trait::async_trait;

/// Image operations: check existence, tag, push, remove.
#[async_trait]
pub trait ImageOps: Send + Sync {
    /// Check if an image exists in the local image store.
    async fn image_exists(&self, reference: &ImageRef) -> Result<bool, ImageError>;

    /// Add `target` as another name for the local image `source`.
    async fn tag_image(&self, source: &ImageRef, target: &ImageRef) -> Result<(), ImageError>;

    /// Push a local image to the registry named in its reference.
    async fn push_image(&self, reference: &ImageRef, options: &PushOptions)
    -> Result<(), ImageError>;

    /// Remove a local image reference.
    async fn remove_image(&self, reference: &ImageRef) -> Result<(), ImageError>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error("tag failed: {0}")]
    TagFailed(String),

    #[error("push failed: {0}")]
    PushFailed(String),

    #[error("image in use, cannot remove: {0}")]
    InUse(String),

    #[error(transparent)]
    Command(#[from] CommandError),
}
