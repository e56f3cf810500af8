//! Content-addressed storage for label photographs and pickup signatures.
//!
//! Images are never embedded in package records. Intake stores each label
//! photograph once and carries only its [`domain::ImageRef`]; signature
//! captures follow the same path.

pub mod adapters;
pub mod domain;
pub mod ports;
