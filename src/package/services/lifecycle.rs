//! Status changes, pickup visits and the aging sweep.

use crate::config::LifecycleConfig;
use crate::customer::domain::CustomerId;
use crate::media::domain::ImageRef;
use crate::package::{
    domain::{Package, PackageDomainError, PackageId, PackageStatus, Pickup, PickupRequest},
    ports::{PackageRepository, PackageRepositoryError},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum PackageLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PackageDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PackageRepositoryError),
    /// No package exists with the given identifier.
    #[error("package {0} not found")]
    NotFound(PackageId),
    /// A pickup was requested without any packages.
    #[error("no packages selected for pickup")]
    EmptyPickup,
    /// The package is not addressed to the customer collecting it.
    #[error("package {package_id} does not belong to customer {customer_id}")]
    WrongCustomer {
        /// Package that was requested.
        package_id: PackageId,
        /// Customer the pickup is for.
        customer_id: CustomerId,
    },
}

/// Result type for lifecycle service operations.
pub type PackageLifecycleResult<T> = Result<T, PackageLifecycleError>;

/// One package that a bulk update could not change.
#[derive(Debug, Clone)]
pub struct BulkUpdateFailure {
    /// Package the update was requested for.
    pub package_id: PackageId,
    /// Why it failed.
    pub error: PackageLifecycleError,
}

/// Outcome of a best-effort bulk update.
///
/// Each identifier is processed independently; a failure never stops the
/// remaining identifiers from being applied.
#[derive(Debug, Clone, Default)]
pub struct BulkUpdateReport {
    /// Packages changed, in request order.
    pub updated: Vec<Package>,
    /// Identifiers that could not be changed, in request order.
    pub failures: Vec<BulkUpdateFailure>,
}

impl BulkUpdateReport {
    /// Returns how many packages were changed.
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.updated.len()
    }

    /// Returns how many identifiers failed.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Returns `true` when every requested identifier was changed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a bulk pickup.
#[derive(Debug, Clone, Default)]
pub struct PickupReport {
    /// Visit recorded for the packages collected; `None` when none were.
    pub pickup: Option<Pickup>,
    /// Per-package outcome.
    pub packages: BulkUpdateReport,
}

/// Package lifecycle orchestration service.
#[derive(Clone)]
pub struct PackageLifecycleService<R, C>
where
    R: PackageRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: LifecycleConfig,
}

impl<R, C> PackageLifecycleService<R, C>
where
    R: PackageRepository,
    C: Clock + Send + Sync,
{
    /// Creates a lifecycle service with the default policy.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            policy: LifecycleConfig::default(),
        }
    }

    /// Replaces the aging threshold and transition policy.
    #[must_use]
    pub fn with_policy(mut self, policy: LifecycleConfig) -> Self {
        self.policy = policy;
        self
    }

    async fn find_package_or_error(&self, id: PackageId) -> PackageLifecycleResult<Package> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PackageLifecycleError::NotFound(id))
    }

    fn apply_status(&self, package: &mut Package, status: PackageStatus) -> PackageLifecycleResult<()> {
        if self.policy.enforce_terminal_states {
            package.transition_to(status, &*self.clock)?;
        } else {
            package.set_status(status, &*self.clock);
        }
        Ok(())
    }

    /// Sets a package's status.
    ///
    /// Under the default policy any status may replace any other. With
    /// `enforce_terminal_states`, only packages awaiting pickup may change.
    ///
    /// # Errors
    ///
    /// Returns [`PackageLifecycleError::NotFound`] for an unknown package,
    /// [`PackageLifecycleError::Domain`] when the strict policy rejects the
    /// change, or repository errors.
    pub async fn set_status(
        &self,
        id: PackageId,
        status: PackageStatus,
    ) -> PackageLifecycleResult<Package> {
        let mut package = self.find_package_or_error(id).await?;
        let previous = package.status();
        self.apply_status(&mut package, status)?;
        self.repository.update(&package).await?;
        info!(package_id = %id, from = %previous, to = %status, "package status changed");
        Ok(package)
    }

    /// Marks a package picked up and records the customer's signature.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_status`].
    pub async fn sign_for_pickup(
        &self,
        id: PackageId,
        signature: ImageRef,
    ) -> PackageLifecycleResult<Package> {
        let mut package = self.find_package_or_error(id).await?;
        self.apply_status(&mut package, PackageStatus::PickedUp)?;
        package.attach_signature(signature, &*self.clock);
        self.repository.update(&package).await?;
        info!(package_id = %id, tracking = %package.tracking(), "package signed for");
        Ok(package)
    }

    /// Returns packages awaiting pickup for at least the configured number
    /// of days as of `now`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn aging_sweep(&self, now: DateTime<Utc>) -> PackageLifecycleResult<Vec<Package>> {
        self.aging_sweep_with_threshold(now, self.policy.aging_threshold())
            .await
    }

    /// Returns packages awaiting pickup for at least `threshold` as of
    /// `now`, oldest first.
    ///
    /// A threshold reaching back before the earliest representable time
    /// matches nothing and yields an empty sweep.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn aging_sweep_with_threshold(
        &self,
        now: DateTime<Utc>,
        threshold: TimeDelta,
    ) -> PackageLifecycleResult<Vec<Package>> {
        let Some(cutoff) = now.checked_sub_signed(threshold) else {
            debug!(%now, %threshold, "aging cutoff out of range; nothing can be aged");
            return Ok(Vec::new());
        };
        let mut aged: Vec<Package> = self
            .repository
            .list_awaiting_pickup_since(cutoff)
            .await?
            .into_iter()
            .filter(|package| package.is_aged(now, threshold))
            .collect();
        aged.sort_by_key(Package::created_at);
        debug!(count = aged.len(), %cutoff, "aging sweep complete");
        Ok(aged)
    }

    /// Runs the aging sweep against the service clock.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn packages_due_for_return(&self) -> PackageLifecycleResult<Vec<Package>> {
        self.aging_sweep(self.clock.utc()).await
    }

    /// Marks each listed package as sent back.
    ///
    /// Unknown identifiers and rejected changes are reported in the result;
    /// they do not stop the remaining identifiers from being processed.
    pub async fn bulk_mark_sent_back(&self, ids: &[PackageId]) -> BulkUpdateReport {
        let mut report = BulkUpdateReport::default();
        for &id in ids {
            match self.set_status(id, PackageStatus::SentBack).await {
                Ok(package) => report.updated.push(package),
                Err(error) => {
                    warn!(package_id = %id, %error, "could not mark package as sent back");
                    report.failures.push(BulkUpdateFailure {
                        package_id: id,
                        error,
                    });
                }
            }
        }
        info!(
            processed = report.processed(),
            failed = report.failed(),
            "bulk sent-back update finished"
        );
        report
    }

    /// Hands several packages to one collector and records the visit.
    ///
    /// Each package must belong to `request.customer_id`. Packages that
    /// cannot be collected are reported per identifier, as for
    /// [`Self::bulk_mark_sent_back`]; the visit lists only the packages that
    /// were. No visit is recorded when nothing was collected.
    ///
    /// # Errors
    ///
    /// Returns [`PackageLifecycleError::EmptyPickup`] for an empty selection,
    /// or a repository error when the visit cannot be recorded. In the latter
    /// case the collected packages keep their picked-up status.
    pub async fn bulk_pick_up(
        &self,
        ids: &[PackageId],
        request: PickupRequest,
    ) -> PackageLifecycleResult<PickupReport> {
        if ids.is_empty() {
            return Err(PackageLifecycleError::EmptyPickup);
        }

        let mut report = BulkUpdateReport::default();
        for &id in ids {
            match self.collect(id, &request).await {
                Ok(package) => report.updated.push(package),
                Err(error) => {
                    warn!(package_id = %id, %error, "could not hand over package");
                    report.failures.push(BulkUpdateFailure {
                        package_id: id,
                        error,
                    });
                }
            }
        }

        let Some(first) = report.updated.first() else {
            info!(
                customer_id = %request.customer_id,
                failed = report.failed(),
                "bulk pickup collected nothing"
            );
            return Ok(PickupReport {
                pickup: None,
                packages: report,
            });
        };
        let pickup = Pickup::record(
            request,
            first.recipient().name(),
            report.updated.iter().map(Package::id).collect(),
            &*self.clock,
        );
        self.repository
            .record_pickup(&pickup)
            .await
            .inspect_err(|error| {
                warn!(
                    pickup_id = %pickup.id(),
                    collected = report.processed(),
                    %error,
                    "packages handed over but the pickup visit was not recorded"
                );
            })?;
        info!(
            pickup_id = %pickup.id(),
            customer_id = %pickup.customer_id(),
            collector = pickup.collector().name(),
            processed = report.processed(),
            failed = report.failed(),
            "bulk pickup finished"
        );
        Ok(PickupReport {
            pickup: Some(pickup),
            packages: report,
        })
    }

    async fn collect(
        &self,
        id: PackageId,
        request: &PickupRequest,
    ) -> PackageLifecycleResult<Package> {
        let mut package = self.find_package_or_error(id).await?;
        if package.customer_id() != Some(request.customer_id) {
            return Err(PackageLifecycleError::WrongCustomer {
                package_id: id,
                customer_id: request.customer_id,
            });
        }
        self.apply_status(&mut package, PackageStatus::PickedUp)?;
        if let Some(signature) = &request.signature {
            package.attach_signature(signature.clone(), &*self.clock);
        }
        self.repository.update(&package).await?;
        Ok(package)
    }
}
