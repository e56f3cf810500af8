//! Error types for package domain validation and parsing.

use super::{PackageId, PackageStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating packages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PackageDomainError {
    /// The courier name is empty after trimming.
    #[error("courier must not be empty")]
    EmptyCourier,

    /// The tracking number is empty after trimming.
    #[error("tracking number must not be empty")]
    EmptyTrackingNumber,

    /// The recipient name is empty after trimming.
    #[error("recipient name must not be empty")]
    EmptyRecipientName,

    /// The postal code is empty after trimming.
    #[error("postal code must not be empty")]
    EmptyPostalCode,

    /// The person collecting packages gave no name.
    #[error("collector name must not be empty")]
    EmptyCollectorName,

    /// The status change is not allowed from the current status.
    #[error("package {package_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Package identifier.
        package_id: PackageId,
        /// Current status.
        from: PackageStatus,
        /// Requested status.
        to: PackageStatus,
    },
}

/// Error returned while parsing a stored or user-supplied status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown package status: {0}")]
pub struct ParsePackageStatusError(pub String);

/// Error returned while parsing a package identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid package identifier: {0}")]
pub struct ParsePackageIdError(pub String);
