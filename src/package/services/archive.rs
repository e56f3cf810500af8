//! Read-side queries over persisted packages.

use crate::customer::domain::CustomerId;
use crate::package::{
    domain::{
        ArchiveFilter, ArchiveScope, Package, PackageDomainError, PackageStatus, Pickup,
        SearchTerm, TrackingNumber, TrackingView,
    },
    ports::{PackageRepository, PackageRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Number of pickup visits shown on the history screen.
pub const DEFAULT_PICKUP_HISTORY_LIMIT: usize = 100;

/// Service-level errors for archive queries.
#[derive(Debug, Clone, Error)]
pub enum ArchiveQueryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PackageDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PackageRepositoryError),
}

/// Result type for archive queries.
pub type ArchiveQueryResult<T> = Result<T, ArchiveQueryError>;

/// Archive query service.
#[derive(Clone)]
pub struct ArchiveQueryService<R>
where
    R: PackageRepository,
{
    repository: Arc<R>,
}

impl<R> ArchiveQueryService<R>
where
    R: PackageRepository,
{
    /// Creates an archive query service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Searches packages whose lifecycle has concluded.
    ///
    /// Matches `term` case-insensitively against recipient name, tracking
    /// number and phone. A blank term returns every concluded package.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn search(&self, term: &str) -> ArchiveQueryResult<Vec<Package>> {
        self.query(ArchiveScope::Concluded, term).await
    }

    /// Searches every persisted package, including those awaiting pickup.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn search_all(&self, term: &str) -> ArchiveQueryResult<Vec<Package>> {
        self.query(ArchiveScope::All, term).await
    }

    /// Returns every concluded package.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_archived(&self) -> ArchiveQueryResult<Vec<Package>> {
        Ok(self
            .repository
            .list_archived(ArchiveScope::Concluded, None)
            .await?)
    }

    /// Returns every persisted package, for client-side narrowing with
    /// [`Self::filter_all`].
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_all(&self) -> ArchiveQueryResult<Vec<Package>> {
        Ok(self.repository.list_archived(ArchiveScope::All, None).await?)
    }

    async fn query(&self, scope: ArchiveScope, term: &str) -> ArchiveQueryResult<Vec<Package>> {
        let search_term = SearchTerm::new(term);
        let packages = self
            .repository
            .list_archived(scope, search_term.as_ref())
            .await?;
        debug!(?scope, term = %term.trim(), count = packages.len(), "archive query");
        Ok(packages)
    }

    /// Narrows a previously fetched list without another query.
    #[must_use]
    pub fn filter_all(packages: &[Package], filter: &ArchiveFilter) -> Vec<Package> {
        filter.apply(packages)
    }

    /// Public tracking lookup.
    ///
    /// Returns `None` when no package has the tracking number.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveQueryError::Domain`] for a blank tracking number and
    /// repository errors.
    pub async fn track(&self, tracking: &str) -> ArchiveQueryResult<Option<TrackingView>> {
        let tracking_number = TrackingNumber::new(tracking)?;
        let package = self.repository.find_by_tracking(&tracking_number).await?;
        Ok(package.as_ref().map(TrackingView::from))
    }

    /// Returns a customer's packages with the given status, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn packages_for_customer(
        &self,
        customer_id: CustomerId,
        status: PackageStatus,
    ) -> ArchiveQueryResult<Vec<Package>> {
        Ok(self
            .repository
            .list_for_customer(customer_id, status)
            .await?)
    }

    /// Returns at most `limit` pickup visits, most recent first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn pickup_history(&self, limit: usize) -> ArchiveQueryResult<Vec<Pickup>> {
        let pickups = self.repository.list_pickups(limit).await?;
        debug!(limit, count = pickups.len(), "pickup history");
        Ok(pickups)
    }
}
