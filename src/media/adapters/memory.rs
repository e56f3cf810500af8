//! In-memory image store for tests and single-process use.

use crate::media::{
    domain::{ImageRef, LabelImage},
    ports::{ImageStore, ImageStoreError, ImageStoreResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory image store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStore {
    images: Arc<RwLock<HashMap<ImageRef, LabelImage>>>,
}

impl InMemoryImageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct images held.
    ///
    /// # Errors
    ///
    /// Returns [`ImageStoreError::Persistence`] when the lock is poisoned.
    pub fn len(&self) -> ImageStoreResult<usize> {
        let images = self
            .images
            .read()
            .map_err(|err| ImageStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(images.len())
    }

    /// Returns `true` when no image is held.
    ///
    /// # Errors
    ///
    /// Returns [`ImageStoreError::Persistence`] when the lock is poisoned.
    pub fn is_empty(&self) -> ImageStoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn put(&self, image: &LabelImage) -> ImageStoreResult<ImageRef> {
        let image_ref = image.content_ref();
        let mut images = self
            .images
            .write()
            .map_err(|err| ImageStoreError::persistence(std::io::Error::other(err.to_string())))?;
        images
            .entry(image_ref.clone())
            .or_insert_with(|| image.clone());
        Ok(image_ref)
    }

    async fn get(&self, image_ref: &ImageRef) -> ImageStoreResult<Option<LabelImage>> {
        let images = self
            .images
            .read()
            .map_err(|err| ImageStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(images.get(image_ref).cloned())
    }
}
