//! Shared world state for intake batch BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use parcelpoint::{
    customer::{adapters::memory::InMemoryCustomerRepository, services::CustomerResolver},
    intake::{
        adapters::scripted::ScriptedLabelExtractor,
        domain::{BatchSummary, CommittedPackage, ExtractedFields},
        ports::ExtractionResult,
        services::{BatchController, ExtractionAdapter, IntakeResult},
    },
    media::{adapters::memory::InMemoryImageStore, domain::LabelImage},
    package::{adapters::memory::InMemoryPackageRepository, domain::Courier},
};
use rstest::fixture;

/// Intake session type used by the BDD world.
pub type TestBatchController = BatchController<
    ScriptedLabelExtractor,
    InMemoryImageStore,
    InMemoryCustomerRepository,
    InMemoryPackageRepository,
    ManualClock,
>;

/// Scenario world for intake batch behaviour tests.
pub struct IntakeWorld {
    pub courier: Option<Courier>,
    pub script: Vec<ExtractionResult<ExtractedFields>>,
    pub customers: Arc<InMemoryCustomerRepository>,
    pub session: Option<TestBatchController>,
    pub last_commit: Option<IntakeResult<CommittedPackage>>,
    pub last_committed: Option<CommittedPackage>,
    pub summary: Option<IntakeResult<BatchSummary>>,
}

impl IntakeWorld {
    /// Creates a world with no session yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            courier: None,
            script: Vec::new(),
            customers: Arc::new(InMemoryCustomerRepository::new()),
            session: None,
            last_commit: None,
            last_committed: None,
            summary: None,
        }
    }

    /// Returns the session, opening it over the scripted extractions on
    /// first use.
    pub fn session(&mut self) -> &mut TestBatchController {
        let script = std::mem::take(&mut self.script);
        let customers = Arc::clone(&self.customers);
        self.session.get_or_insert_with(|| {
            let clock = Arc::new(ManualClock::fixed());
            BatchController::new(
                ExtractionAdapter::new(Arc::new(ScriptedLabelExtractor::new(script))),
                Arc::new(InMemoryImageStore::new()),
                CustomerResolver::new(customers, Arc::clone(&clock)),
                Arc::new(InMemoryPackageRepository::new()),
                clock,
            )
        })
    }

    /// Records a commit outcome.
    pub fn record_commit(&mut self, result: IntakeResult<CommittedPackage>) {
        if let Ok(ref committed) = result {
            self.last_committed = Some(committed.clone());
        }
        self.last_commit = Some(result);
    }

    /// Returns the courier chosen for the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no courier step ran.
    pub fn courier(&self) -> eyre::Result<Courier> {
        self.courier
            .clone()
            .ok_or_else(|| eyre::eyre!("missing courier in scenario world"))
    }
}

impl Default for IntakeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> IntakeWorld {
    IntakeWorld::default()
}

/// Builds one label photograph per scripted extraction.
pub fn photos(count: usize) -> Vec<LabelImage> {
    (0..count)
        .map(|n| LabelImage::jpeg(format!("scenario-label-{n}").into_bytes()))
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
