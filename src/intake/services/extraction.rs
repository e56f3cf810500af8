//! Boundary around the extraction backend that never fails.

use crate::intake::{
    domain::ExtractedFields,
    ports::{ExtractionError, LabelExtractor},
};
use crate::media::domain::LabelImage;
use crate::package::domain::Courier;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default limit on a single extraction call.
pub const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Calls an extraction backend with a timeout, degrading every failure to
/// an all-blank field set.
pub struct ExtractionAdapter<E>
where
    E: LabelExtractor,
{
    extractor: Arc<E>,
    timeout: Duration,
}

impl<E> Clone for ExtractionAdapter<E>
where
    E: LabelExtractor,
{
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            timeout: self.timeout,
        }
    }
}

impl<E> ExtractionAdapter<E>
where
    E: LabelExtractor,
{
    /// Wraps `extractor` with the default timeout.
    #[must_use]
    pub const fn new(extractor: Arc<E>) -> Self {
        Self {
            extractor,
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    /// Replaces the per-call timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the per-call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Extracts recipient fields from `image`.
    ///
    /// Backend errors and timeouts are logged and yield
    /// [`ExtractedFields::empty`].
    pub async fn extract(&self, image: &LabelImage, courier: &Courier) -> ExtractedFields {
        let image_ref = image.content_ref();
        let outcome = tokio::time::timeout(self.timeout, self.extractor.extract(image, courier))
            .await
            .unwrap_or_else(|_| Err(ExtractionError::TimedOut(self.timeout)));
        outcome
            .inspect(|_| debug!(image = %image_ref, %courier, "label fields extracted"))
            .unwrap_or_else(|error| {
                warn!(image = %image_ref, %courier, %error, "extraction failed; fields left blank");
                ExtractedFields::empty()
            })
    }
}
