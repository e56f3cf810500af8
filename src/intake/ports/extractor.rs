//! Extraction backend contracts.

use crate::intake::domain::ExtractedFields;
use crate::media::domain::LabelImage;
use crate::package::domain::Courier;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for extraction backends.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Backend that proposes recipient fields for a label photograph.
///
/// Implementations may fail; the intake extraction adapter turns any
/// failure into an all-blank field set.
#[async_trait]
pub trait LabelExtractor: Send + Sync {
    /// Extracts recipient fields from `image` for a label of `courier`.
    async fn extract(
        &self,
        image: &LabelImage,
        courier: &Courier,
    ) -> ExtractionResult<ExtractedFields>;
}

/// External optical text recognition engine.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Returns the text lines recognised in `image`, top to bottom.
    async fn recognize(&self, image: &LabelImage) -> ExtractionResult<Vec<String>>;
}

/// Errors reported by extraction backends.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// The backend failed while processing the image.
    #[error("extraction backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
    /// The backend cannot serve requests.
    #[error("extraction backend unavailable: {0}")]
    Unavailable(String),
    /// The backend did not answer in time.
    #[error("extraction timed out after {0:?}")]
    TimedOut(Duration),
}

impl ExtractionError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
