//! Filesystem image store confined to a capability directory.
//!
//! Each image is written as `<digest>.img` with its media type beside it in
//! `<digest>.type`. The store never resolves paths outside the directory it
//! was given.

use crate::media::{
    domain::{ImageRef, LabelImage},
    ports::{ImageStore, ImageStoreError, ImageStoreResult},
};
use async_trait::async_trait;
use camino::Utf8PathBuf;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

/// Image store writing into a `cap_std` directory handle.
#[derive(Debug, Clone)]
pub struct DirImageStore {
    dir: Arc<Dir>,
}

impl DirImageStore {
    /// Creates a store rooted at an already-opened directory.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ImageStoreResult<T>
    where
        F: FnOnce(&Dir) -> ImageStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(ImageStoreError::persistence)?
    }
}

fn payload_path(image_ref: &ImageRef) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{}.img", image_ref.digest_hex()))
}

fn media_type_path(image_ref: &ImageRef) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{}.type", image_ref.digest_hex()))
}

#[async_trait]
impl ImageStore for DirImageStore {
    async fn put(&self, image: &LabelImage) -> ImageStoreResult<ImageRef> {
        let image_ref = image.content_ref();
        let payload = payload_path(&image_ref);
        let media_type = media_type_path(&image_ref);
        let owned = image.clone();

        self.run_blocking(move |dir| {
            if dir.exists(&payload) {
                return Ok(());
            }
            dir.write(&media_type, owned.media_type())
                .map_err(ImageStoreError::persistence)?;
            dir.write(&payload, owned.bytes())
                .map_err(ImageStoreError::persistence)
        })
        .await?;

        Ok(image_ref)
    }

    async fn get(&self, image_ref: &ImageRef) -> ImageStoreResult<Option<LabelImage>> {
        let payload = payload_path(image_ref);
        let media_type = media_type_path(image_ref);

        self.run_blocking(move |dir| {
            let bytes = match dir.read(&payload) {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(ImageStoreError::persistence(err)),
            };
            let declared = dir
                .read_to_string(&media_type)
                .map_err(ImageStoreError::persistence)?;
            Ok(Some(LabelImage::new(bytes, declared)))
        })
        .await
    }
}
