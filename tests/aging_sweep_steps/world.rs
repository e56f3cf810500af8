//! Shared world state for aging sweep BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use parcelpoint::{
    config::LifecycleConfig,
    package::{
        adapters::memory::InMemoryPackageRepository,
        domain::Package,
        services::{
            ArchiveQueryService, BulkUpdateReport, PackageLifecycleError,
            PackageLifecycleService,
        },
    },
};
use rstest::fixture;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycleService = PackageLifecycleService<InMemoryPackageRepository, ManualClock>;

/// Scenario world for aging sweep behaviour tests.
pub struct AgingWorld {
    pub clock: Arc<ManualClock>,
    pub packages: Arc<InMemoryPackageRepository>,
    pub policy: LifecycleConfig,
    pub received: Vec<Package>,
    pub swept: Vec<Package>,
    pub report: Option<BulkUpdateReport>,
    pub last_status_change: Option<Result<Package, PackageLifecycleError>>,
}

impl AgingWorld {
    /// Creates a world with an empty shelf.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Arc::new(ManualClock::fixed()),
            packages: Arc::new(InMemoryPackageRepository::new()),
            policy: LifecycleConfig::default(),
            received: Vec::new(),
            swept: Vec::new(),
            report: None,
            last_status_change: None,
        }
    }

    /// Builds a lifecycle service using the scenario policy.
    #[must_use]
    pub fn lifecycle(&self) -> TestLifecycleService {
        PackageLifecycleService::new(Arc::clone(&self.packages), Arc::clone(&self.clock))
            .with_policy(self.policy.clone())
    }

    /// Builds an archive query service over the scenario shelf.
    #[must_use]
    pub fn archive(&self) -> ArchiveQueryService<InMemoryPackageRepository> {
        ArchiveQueryService::new(Arc::clone(&self.packages))
    }

    /// Finds a received package by recipient name.
    ///
    /// # Errors
    ///
    /// Returns an error when no package was received for `name`.
    pub fn package_named(&self, name: &str) -> eyre::Result<&Package> {
        self.received
            .iter()
            .find(|package| package.recipient().name() == name)
            .ok_or_else(|| eyre::eyre!("no package received for {name}"))
    }
}

impl Default for AgingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AgingWorld {
    AgingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
