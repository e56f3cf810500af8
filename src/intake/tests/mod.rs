//! Unit tests for the intake context.


use crate::intake::domain::ExtractedFields;

/// Builds a field set from string slices.
fn fields(name: &str, tracking: &str, phone: &str, postal: &str) -> ExtractedFields {
    ExtractedFields {
        name: name.to_owned(),
        tracking: tracking.to_owned(),
        phone: phone.to_owned(),
        postal: postal.to_owned(),
    }
}
