//! Reviewable intake item held by a batch session.

use super::{ExtractedFields, FieldKind, IntakeDomainError, RequiredField};
use crate::media::domain::ImageRef;
use crate::package::domain::Courier;

/// One label awaiting staff review.
///
/// The missing-field set is recomputed on every edit, so it always reflects
/// the current field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingIntakeItem {
    courier: Courier,
    fields: ExtractedFields,
    label_image: Option<ImageRef>,
    missing: Vec<RequiredField>,
}

impl PendingIntakeItem {
    /// Creates an item from extracted fields.
    #[must_use]
    pub fn new(courier: Courier, fields: ExtractedFields, label_image: Option<ImageRef>) -> Self {
        let missing = fields.missing_fields();
        Self {
            courier,
            fields,
            label_image,
            missing,
        }
    }

    /// Returns the courier chosen for the batch.
    #[must_use]
    pub const fn courier(&self) -> &Courier {
        &self.courier
    }

    /// Returns the current field values.
    #[must_use]
    pub const fn fields(&self) -> &ExtractedFields {
        &self.fields
    }

    /// Returns the stored label photograph.
    #[must_use]
    pub const fn label_image(&self) -> Option<&ImageRef> {
        self.label_image.as_ref()
    }

    /// Returns the required fields that are still blank.
    #[must_use]
    pub fn missing_fields(&self) -> &[RequiredField] {
        &self.missing
    }

    /// Returns `true` when the item can be committed as is.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Replaces one field and recomputes completeness.
    pub fn edit(&mut self, kind: FieldKind, value: impl Into<String>) {
        self.fields.set(kind, value);
        self.missing = self.fields.missing_fields();
    }

    /// Fills blank phone and postal values from a known customer record.
    ///
    /// Values already present on the item are never replaced.
    pub fn complete_from(&mut self, phone: Option<&str>, postal: Option<&str>) {
        if self.fields.phone.trim().is_empty() {
            if let Some(known) = phone {
                self.fields.phone = known.to_owned();
            }
        }
        if self.fields.postal.trim().is_empty() {
            if let Some(known) = postal {
                self.fields.postal = known.to_owned();
            }
        }
        self.missing = self.fields.missing_fields();
    }

    /// Checks that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeDomainError::MissingRequiredField`] listing every
    /// blank required field.
    pub fn validate_for_commit(&self) -> Result<(), IntakeDomainError> {
        let missing = self.fields.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(IntakeDomainError::MissingRequiredField(missing))
        }
    }
}
