//! Domain model for label intake.

mod error;
mod fields;
mod pending;
mod postal;
mod summary;

pub use error::IntakeDomainError;
pub use fields::{ExtractedFields, FieldKind, RequiredField};
pub use pending::PendingIntakeItem;
pub use postal::normalize_postal_code;
pub use summary::{BatchSummary, CommittedPackage, CustomerGroup};
