//! Identifier and validated scalar types for packages.

use super::{PackageDomainError, ParsePackageIdError};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a package record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(Uuid);

impl PackageId {
    /// Creates a new random package identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a package identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses the hyphenated form sent back by the UI.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePackageIdError`] when the value is not a UUID.
    pub fn parse(value: &str) -> Result<Self, ParsePackageIdError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| ParsePackageIdError(value.to_owned()))
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for PackageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a pickup visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PickupId(Uuid);

impl PickupId {
    /// Creates a new random pickup identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a pickup identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for PickupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PickupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Carrier tracking number, trimmed and with inner spaces removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingNumber(String);

impl TrackingNumber {
    /// Creates a validated tracking number.
    ///
    /// # Errors
    ///
    /// Returns [`PackageDomainError::EmptyTrackingNumber`] when nothing but
    /// whitespace was given.
    pub fn new(value: impl Into<String>) -> Result<Self, PackageDomainError> {
        let compact: String = value
            .into()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if compact.is_empty() {
            return Err(PackageDomainError::EmptyTrackingNumber);
        }
        Ok(Self(compact))
    }

    /// Returns the tracking number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TrackingNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Carrier that delivered the package, as selected by staff.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Courier(String);

impl Courier {
    /// Creates a validated courier name.
    ///
    /// # Errors
    ///
    /// Returns [`PackageDomainError::EmptyCourier`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, PackageDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PackageDomainError::EmptyCourier);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the courier name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Courier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
