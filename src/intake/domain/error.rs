//! Error types for the intake domain.

use super::RequiredField;
use thiserror::Error;

/// Errors raised while reconciling an intake item.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeDomainError {
    /// One or more required fields are blank. Listed in canonical order.
    #[error("missing required field(s): {}", list_fields(.0))]
    MissingRequiredField(Vec<RequiredField>),
}

fn list_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
