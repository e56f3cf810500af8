//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use parcelpoint::{
    config::PickupPointConfig,
    customer::{adapters::memory::InMemoryCustomerRepository, services::CustomerResolver},
    intake::{
        adapters::scripted::ScriptedLabelExtractor,
        domain::ExtractedFields,
        ports::ExtractionResult,
        services::{BatchController, ExtractionAdapter},
    },
    media::{adapters::memory::InMemoryImageStore, domain::LabelImage},
    package::{
        adapters::memory::InMemoryPackageRepository,
        services::{ArchiveQueryService, PackageLifecycleService},
    },
};

/// Intake session wired to in-memory adapters.
pub type TestBatchController = BatchController<
    ScriptedLabelExtractor,
    InMemoryImageStore,
    InMemoryCustomerRepository,
    InMemoryPackageRepository,
    ManualClock,
>;

/// A pickup counter backed entirely by in-memory adapters.
pub struct PickupCounter {
    pub clock: Arc<ManualClock>,
    pub customers: Arc<InMemoryCustomerRepository>,
    pub packages: Arc<InMemoryPackageRepository>,
    pub images: Arc<InMemoryImageStore>,
    pub lifecycle: PackageLifecycleService<InMemoryPackageRepository, ManualClock>,
    pub archive: ArchiveQueryService<InMemoryPackageRepository>,
    config: PickupPointConfig,
}

impl PickupCounter {
    /// Wires a counter using `config`.
    pub fn with_config(config: PickupPointConfig) -> Self {
        let clock = Arc::new(ManualClock::fixed());
        let packages = Arc::new(InMemoryPackageRepository::new());
        Self {
            lifecycle: PackageLifecycleService::new(Arc::clone(&packages), Arc::clone(&clock))
                .with_policy(config.lifecycle.clone()),
            archive: ArchiveQueryService::new(Arc::clone(&packages)),
            customers: Arc::new(InMemoryCustomerRepository::new()),
            images: Arc::new(InMemoryImageStore::new()),
            packages,
            clock,
            config,
        }
    }

    /// Opens an intake session whose extractor replays `script`.
    pub fn open_session(
        &self,
        script: Vec<ExtractionResult<ExtractedFields>>,
    ) -> TestBatchController {
        let extraction = ExtractionAdapter::new(Arc::new(ScriptedLabelExtractor::new(script)))
            .with_timeout(self.config.intake.extraction_timeout());
        let resolver = CustomerResolver::new(Arc::clone(&self.customers), Arc::clone(&self.clock))
            .with_location(self.config.location.clone());
        BatchController::new(
            extraction,
            Arc::clone(&self.images),
            resolver,
            Arc::clone(&self.packages),
            Arc::clone(&self.clock),
        )
        .with_postal_prefix(self.config.location.postal_prefix.clone())
    }
}

impl Default for PickupCounter {
    fn default() -> Self {
        Self::with_config(PickupPointConfig::default())
    }
}

/// Builds an extracted field set.
pub fn label_fields(name: &str, tracking: &str, phone: &str, postal: &str) -> ExtractedFields {
    ExtractedFields {
        name: name.to_owned(),
        tracking: tracking.to_owned(),
        phone: phone.to_owned(),
        postal: postal.to_owned(),
    }
}

/// Builds `count` distinct label photographs.
pub fn label_photos(count: usize) -> Vec<LabelImage> {
    (0..count)
        .map(|n| LabelImage::jpeg(format!("photo-{n}").into_bytes()))
        .collect()
}
