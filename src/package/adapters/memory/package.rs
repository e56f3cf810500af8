//! In-memory package repository for tests and local use.

use crate::customer::domain::CustomerId;
use crate::package::{
    domain::{
        ArchiveScope, Package, PackageId, PackageStatus, Pickup, SearchTerm, TrackingNumber,
    },
    ports::{PackageRepository, PackageRepositoryError, PackageRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::cmp::Reverse;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// Thread-safe in-memory package repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPackageRepository {
    packages: Arc<RwLock<HashMap<PackageId, Package>>>,
    pickups: Arc<RwLock<Vec<Pickup>>>,
}

impl InMemoryPackageRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> PackageRepositoryResult<RwLockReadGuard<'_, HashMap<PackageId, Package>>> {
        self.packages.read().map_err(|err| lock_error(&err))
    }

    fn collect_where(
        &self,
        predicate: impl Fn(&Package) -> bool,
    ) -> PackageRepositoryResult<Vec<Package>> {
        let packages = self.read()?;
        Ok(packages
            .values()
            .filter(|package| predicate(package))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PackageRepository for InMemoryPackageRepository {
    async fn store(&self, package: &Package) -> PackageRepositoryResult<()> {
        let mut packages = self.packages.write().map_err(|err| lock_error(&err))?;
        if packages.contains_key(&package.id()) {
            return Err(PackageRepositoryError::DuplicatePackage(package.id()));
        }
        packages.insert(package.id(), package.clone());
        Ok(())
    }

    async fn update(&self, package: &Package) -> PackageRepositoryResult<()> {
        let mut packages = self.packages.write().map_err(|err| lock_error(&err))?;
        let slot = packages
            .get_mut(&package.id())
            .ok_or(PackageRepositoryError::NotFound(package.id()))?;
        *slot = package.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: PackageId) -> PackageRepositoryResult<Option<Package>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_by_tracking(
        &self,
        tracking: &TrackingNumber,
    ) -> PackageRepositoryResult<Option<Package>> {
        let matches = self.collect_where(|package| package.tracking() == tracking)?;
        Ok(matches.into_iter().max_by_key(Package::created_at))
    }

    async fn list_awaiting_pickup_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> PackageRepositoryResult<Vec<Package>> {
        let mut waiting = self.collect_where(|package| {
            package.status() == PackageStatus::AvailableForPickup && package.created_at() <= cutoff
        })?;
        waiting.sort_by_key(Package::created_at);
        Ok(waiting)
    }

    async fn list_archived(
        &self,
        scope: ArchiveScope,
        term: Option<&SearchTerm>,
    ) -> PackageRepositoryResult<Vec<Package>> {
        let mut archived = self.collect_where(|package| {
            scope.includes(package.status()) && term.is_none_or(|needle| needle.matches(package))
        })?;
        archived.sort_by_key(|package| Reverse(package.updated_at()));
        Ok(archived)
    }

    async fn list_for_customer(
        &self,
        customer_id: CustomerId,
        status: PackageStatus,
    ) -> PackageRepositoryResult<Vec<Package>> {
        let mut owned = self.collect_where(|package| {
            package.customer_id() == Some(customer_id) && package.status() == status
        })?;
        owned.sort_by_key(|package| Reverse(package.created_at()));
        Ok(owned)
    }

    async fn record_pickup(&self, pickup: &Pickup) -> PackageRepositoryResult<()> {
        let mut pickups = self.pickups.write().map_err(|err| lock_error(&err))?;
        if pickups.iter().any(|existing| existing.id() == pickup.id()) {
            return Err(PackageRepositoryError::DuplicatePickup(pickup.id()));
        }
        pickups.push(pickup.clone());
        Ok(())
    }

    async fn list_pickups(&self, limit: usize) -> PackageRepositoryResult<Vec<Pickup>> {
        let pickups = self.pickups.read().map_err(|err| lock_error(&err))?;
        let mut recent: Vec<Pickup> = pickups.iter().rev().cloned().collect();
        recent.sort_by_key(|pickup| Reverse(pickup.picked_up_at()));
        recent.truncate(limit);
        Ok(recent)
    }
}

fn lock_error<T>(err: &PoisonError<T>) -> PackageRepositoryError {
    PackageRepositoryError::persistence(std::io::Error::other(err.to_string()))
}
