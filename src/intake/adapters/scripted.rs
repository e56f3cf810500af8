//! Extractors that replay prepared results, for demos and tests.

use crate::intake::{
    domain::ExtractedFields,
    ports::{ExtractionError, ExtractionResult, LabelExtractor},
};
use crate::media::domain::LabelImage;
use crate::package::domain::Courier;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Returns prepared results in order, one per call.
///
/// Once the script runs out every call fails as unavailable.
#[derive(Debug, Default)]
pub struct ScriptedLabelExtractor {
    script: Mutex<VecDeque<ExtractionResult<ExtractedFields>>>,
}

impl ScriptedLabelExtractor {
    /// Creates an extractor that replays `results`.
    #[must_use]
    pub fn new(results: impl IntoIterator<Item = ExtractionResult<ExtractedFields>>) -> Self {
        Self {
            script: Mutex::new(results.into_iter().collect()),
        }
    }

    /// Returns how many results are left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl LabelExtractor for ScriptedLabelExtractor {
    async fn extract(
        &self,
        _image: &LabelImage,
        _courier: &Courier,
    ) -> ExtractionResult<ExtractedFields> {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ExtractionError::Unavailable("script exhausted".to_owned())))
    }
}

/// Returns the same fields for every image.
#[derive(Debug, Clone, Default)]
pub struct FixedLabelExtractor {
    fields: ExtractedFields,
}

impl FixedLabelExtractor {
    /// Creates an extractor that always proposes `fields`.
    #[must_use]
    pub const fn new(fields: ExtractedFields) -> Self {
        Self { fields }
    }
}

#[async_trait]
impl LabelExtractor for FixedLabelExtractor {
    async fn extract(
        &self,
        _image: &LabelImage,
        _courier: &Courier,
    ) -> ExtractionResult<ExtractedFields> {
        Ok(self.fields.clone())
    }
}
