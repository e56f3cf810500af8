//! Repository port for package persistence and archive queries.

use crate::customer::domain::CustomerId;
use crate::package::domain::{
    ArchiveScope, Package, PackageId, PackageStatus, Pickup, PickupId, SearchTerm, TrackingNumber,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for package repository operations.
pub type PackageRepositoryResult<T> = Result<T, PackageRepositoryError>;

/// Package persistence contract.
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Stores a newly received package.
    ///
    /// # Errors
    ///
    /// Returns [`PackageRepositoryError::DuplicatePackage`] when the
    /// identifier already exists.
    async fn store(&self, package: &Package) -> PackageRepositoryResult<()>;

    /// Persists status, signature and timestamp changes.
    ///
    /// # Errors
    ///
    /// Returns [`PackageRepositoryError::NotFound`] when the package does not
    /// exist.
    async fn update(&self, package: &Package) -> PackageRepositoryResult<()>;

    /// Finds a package by identifier.
    async fn find_by_id(&self, id: PackageId) -> PackageRepositoryResult<Option<Package>>;

    /// Finds the most recently received package with the tracking number.
    async fn find_by_tracking(
        &self,
        tracking: &TrackingNumber,
    ) -> PackageRepositoryResult<Option<Package>>;

    /// Returns packages still awaiting pickup that were received at or
    /// before `cutoff`, oldest first.
    async fn list_awaiting_pickup_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> PackageRepositoryResult<Vec<Package>>;

    /// Returns packages in `scope`, optionally narrowed by `term`, most
    /// recently changed first. No limit is applied.
    async fn list_archived(
        &self,
        scope: ArchiveScope,
        term: Option<&SearchTerm>,
    ) -> PackageRepositoryResult<Vec<Package>>;

    /// Returns a customer's packages with the given status, newest first.
    async fn list_for_customer(
        &self,
        customer_id: CustomerId,
        status: PackageStatus,
    ) -> PackageRepositoryResult<Vec<Package>>;

    /// Records a completed pickup visit.
    ///
    /// # Errors
    ///
    /// Returns [`PackageRepositoryError::DuplicatePickup`] when the
    /// identifier already exists.
    async fn record_pickup(&self, pickup: &Pickup) -> PackageRepositoryResult<()>;

    /// Returns at most `limit` pickup visits, most recent first.
    async fn list_pickups(&self, limit: usize) -> PackageRepositoryResult<Vec<Pickup>>;
}

/// Errors returned by package repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PackageRepositoryError {
    /// A package with the same identifier already exists.
    #[error("duplicate package identifier: {0}")]
    DuplicatePackage(PackageId),

    /// A pickup with the same identifier already exists.
    #[error("duplicate pickup identifier: {0}")]
    DuplicatePickup(PickupId),

    /// The package was not found.
    #[error("package not found: {0}")]
    NotFound(PackageId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PackageRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
