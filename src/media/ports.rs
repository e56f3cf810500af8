//! Storage port for image payloads.

use super::domain::{ImageRef, LabelImage};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for image store operations.
pub type ImageStoreResult<T> = Result<T, ImageStoreError>;

/// Content-addressed image storage contract.
///
/// Storing identical bytes twice yields the same reference and keeps a
/// single copy.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores an image and returns its content address.
    async fn put(&self, image: &LabelImage) -> ImageStoreResult<ImageRef>;

    /// Loads a previously stored image.
    ///
    /// Returns `None` when nothing is stored under the reference.
    async fn get(&self, image_ref: &ImageRef) -> ImageStoreResult<Option<LabelImage>>;
}

/// Errors returned by image store implementations.
#[derive(Debug, Clone, Error)]
pub enum ImageStoreError {
    /// Storage-layer failure.
    #[error("image storage error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ImageStoreError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
