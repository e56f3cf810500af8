//! Port contracts for package persistence.

pub mod repository;

pub use repository::{PackageRepository, PackageRepositoryError, PackageRepositoryResult};
