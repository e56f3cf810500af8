//! Error types for customer domain validation.

use thiserror::Error;

/// Errors returned while constructing customer values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomerDomainError {
    /// The customer name is empty after trimming.
    #[error("customer name must not be empty")]
    EmptyName,
}
