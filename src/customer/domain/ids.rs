//! Identifier and validated name types for customers.

use super::CustomerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a customer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Creates a new random customer identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a customer identifier from an existing UUID.
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

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer display name as first seen on a label, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerName(String);

impl CustomerName {
    /// Creates a validated customer name.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerDomainError::EmptyName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CustomerDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CustomerDomainError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the lookup key for this name.
    #[must_use]
    pub fn key(&self) -> CustomerNameKey {
        CustomerNameKey::from_name(self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case-folded lookup key; two names resolve to the same customer exactly
/// when their keys are equal.
///
/// Inner whitespace is kept as-is: "John  Smith" and "John Smith" are
/// different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerNameKey(String);

impl CustomerNameKey {
    fn from_name(name: &CustomerName) -> Self {
        Self(name.as_str().to_lowercase())
    }

    /// Reconstructs a key from its persisted form.
    #[must_use]
    pub fn from_persisted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerNameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
