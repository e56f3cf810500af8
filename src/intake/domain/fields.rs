//! Extracted label fields and required-field completeness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Editable field of an intake item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Recipient name.
    Name,
    /// Tracking number.
    Tracking,
    /// Recipient phone; never required.
    Phone,
    /// Postal code.
    Postal,
}

/// Field that must be non-blank before an item can be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    /// Recipient name.
    Name,
    /// Tracking number.
    Tracking,
    /// Postal code.
    Postal,
}

impl RequiredField {
    /// Every required field, in canonical order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Tracking, Self::Postal];

    /// Returns the lowercase field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Tracking => "tracking",
            Self::Postal => "postal",
        }
    }

    /// Returns the editable field this requirement applies to.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Name => FieldKind::Name,
            Self::Tracking => FieldKind::Tracking,
            Self::Postal => FieldKind::Postal,
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recipient fields proposed by extraction or typed by staff.
///
/// Blank strings mean "not found"; values are kept as given until commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Recipient name.
    pub name: String,
    /// Tracking number.
    pub tracking: String,
    /// Recipient phone.
    pub phone: String,
    /// Postal code.
    pub postal: String,
}

impl ExtractedFields {
    /// Returns a field set with every value blank, the result of a failed
    /// extraction.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            name: String::new(),
            tracking: String::new(),
            phone: String::new(),
            postal: String::new(),
        }
    }

    /// Returns the value of `kind`.
    #[must_use]
    pub fn get(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Name => &self.name,
            FieldKind::Tracking => &self.tracking,
            FieldKind::Phone => &self.phone,
            FieldKind::Postal => &self.postal,
        }
    }

    /// Replaces the value of `kind`.
    pub fn set(&mut self, kind: FieldKind, value: impl Into<String>) {
        let slot = match kind {
            FieldKind::Name => &mut self.name,
            FieldKind::Tracking => &mut self.tracking,
            FieldKind::Phone => &mut self.phone,
            FieldKind::Postal => &mut self.postal,
        };
        *slot = value.into();
    }

    /// Returns the required fields whose trimmed value is empty, in
    /// canonical order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|field| self.get(field.kind()).trim().is_empty())
            .collect()
    }

    /// Returns `true` when every field, phone included, is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        [FieldKind::Name, FieldKind::Tracking, FieldKind::Phone, FieldKind::Postal]
            .into_iter()
            .all(|kind| self.get(kind).trim().is_empty())
    }
}
