//! Image payloads and their content addresses.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

const REF_PREFIX: &str = "sha256:";
const DIGEST_HEX_LEN: usize = 64;

/// Raw image bytes with their declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelImage {
    bytes: Vec<u8>,
    media_type: String,
}

impl LabelImage {
    /// Creates an image payload.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into().trim().to_ascii_lowercase(),
        }
    }

    /// Creates a JPEG payload, the format label cameras produce.
    #[must_use]
    pub fn jpeg(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(bytes, "image/jpeg")
    }

    /// Returns the image bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the media type, lowercased.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Computes the content address of this image.
    #[must_use]
    pub fn content_ref(&self) -> ImageRef {
        ImageRef::for_bytes(&self.bytes)
    }
}

/// SHA-256 content address of a stored image, rendered `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageRef(String);

impl ImageRef {
    /// Derives the reference for the given bytes.
    #[must_use]
    pub fn for_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(format!("{REF_PREFIX}{digest:x}"))
    }

    /// Parses a persisted reference.
    ///
    /// # Errors
    ///
    /// Returns [`ImageRefError`] when the value is not `sha256:` followed by
    /// 64 lowercase hexadecimal characters.
    pub fn parse(value: &str) -> Result<Self, ImageRefError> {
        let trimmed = value.trim();
        let is_valid = trimmed.strip_prefix(REF_PREFIX).is_some_and(|hex| {
            hex.len() == DIGEST_HEX_LEN
                && hex
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        });
        if !is_valid {
            return Err(ImageRefError(value.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the hexadecimal digest without the algorithm prefix.
    #[must_use]
    pub fn digest_hex(&self) -> &str {
        self.0.strip_prefix(REF_PREFIX).unwrap_or(&self.0)
    }

    /// Returns the full reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImageRef {
    type Error = ImageRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a stored image reference is malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid image reference: {0}")]
pub struct ImageRefError(pub String);
