//! Working session that turns reviewed labels into persisted packages.

use super::ExtractionAdapter;
use crate::config::LocationConfig;
use crate::customer::{
    domain::CustomerName,
    ports::CustomerRepository,
    services::{CustomerResolver, CustomerResolverError, ResolveCustomerRequest},
};
use crate::intake::{
    domain::{
        BatchSummary, CommittedPackage, FieldKind, IntakeDomainError, PendingIntakeItem,
        normalize_postal_code,
    },
    ports::LabelExtractor,
};
use crate::media::{domain::LabelImage, ports::ImageStore};
use crate::package::{
    domain::{Courier, Package, PackageDomainError, ReceivePackage, Recipient, TrackingNumber},
    ports::{PackageRepository, PackageRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced to the operator during an intake session.
#[derive(Debug, Clone, Error)]
pub enum IntakeError {
    /// Required fields are blank.
    #[error(transparent)]
    Domain(#[from] IntakeDomainError),
    /// Field values were rejected by the package model.
    #[error(transparent)]
    Package(#[from] PackageDomainError),
    /// Customer resolution failed.
    #[error(transparent)]
    Customer(#[from] CustomerResolverError),
    /// Persisting the package failed.
    #[error(transparent)]
    Repository(#[from] PackageRepositoryError),
    /// The index does not address a pending item.
    #[error("pending index {index} out of range for {len} item(s)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current pending list length.
        len: usize,
    },
    /// Finalize was called before anything was committed.
    #[error("no packages have been committed in this session")]
    EmptyBatch,
}

/// Result type for intake session operations.
pub type IntakeResult<T> = Result<T, IntakeError>;

/// Owns the pending and committed lists of one intake session.
///
/// Indices always address the current pending list: removing an item
/// shifts every later item down by one.
pub struct BatchController<E, S, CR, PR, C>
where
    E: LabelExtractor,
    S: ImageStore,
    CR: CustomerRepository,
    PR: PackageRepository,
    C: Clock + Send + Sync,
{
    extraction: ExtractionAdapter<E>,
    images: Arc<S>,
    customers: CustomerResolver<CR, C>,
    packages: Arc<PR>,
    clock: Arc<C>,
    postal_prefix: String,
    pending: Vec<PendingIntakeItem>,
    batch: Vec<CommittedPackage>,
}

impl<E, S, CR, PR, C> BatchController<E, S, CR, PR, C>
where
    E: LabelExtractor,
    S: ImageStore,
    CR: CustomerRepository,
    PR: PackageRepository,
    C: Clock + Send + Sync,
{
    /// Creates an empty session.
    #[must_use]
    pub fn new(
        extraction: ExtractionAdapter<E>,
        images: Arc<S>,
        customers: CustomerResolver<CR, C>,
        packages: Arc<PR>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            extraction,
            images,
            customers,
            packages,
            clock,
            postal_prefix: LocationConfig::default().postal_prefix,
            pending: Vec::new(),
            batch: Vec::new(),
        }
    }

    /// Sets the prefix completing three-character postal codes.
    #[must_use]
    pub fn with_postal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.postal_prefix = prefix.into();
        self
    }

    /// Returns the items awaiting review, in load order.
    #[must_use]
    pub fn pending(&self) -> &[PendingIntakeItem] {
        &self.pending
    }

    /// Returns the packages committed in this session, in commit order.
    #[must_use]
    pub fn batch(&self) -> &[CommittedPackage] {
        &self.batch
    }

    /// Stores and extracts each image in order, appending one pending item
    /// per image.
    ///
    /// A failure on one image never stops the rest: extraction failures
    /// leave the fields blank and storage failures leave the item without a
    /// label reference. Returns the number of items added.
    pub async fn load_images(&mut self, courier: &Courier, images: &[LabelImage]) -> usize {
        for image in images {
            let item = self.prepare_item(courier, image).await;
            debug!(
                index = self.pending.len(),
                missing = item.missing_fields().len(),
                "label queued for review"
            );
            self.pending.push(item);
        }
        info!(count = images.len(), %courier, "labels loaded");
        images.len()
    }

    async fn prepare_item(&self, courier: &Courier, image: &LabelImage) -> PendingIntakeItem {
        let label_image = self
            .images
            .put(image)
            .await
            .inspect_err(|error| warn!(%error, "label image could not be stored"))
            .ok();
        let fields = self.extraction.extract(image, courier).await;
        let mut item = PendingIntakeItem::new(courier.clone(), fields, label_image);
        self.complete_from_known_customer(&mut item).await;
        item
    }

    async fn complete_from_known_customer(&self, item: &mut PendingIntakeItem) {
        let Ok(name) = CustomerName::new(item.fields().name.as_str()) else {
            return;
        };
        match self
            .customers
            .repository()
            .find_by_name_key(&name.key())
            .await
        {
            Ok(Some(known)) => {
                let contact = known.contact();
                item.complete_from(contact.phone(), contact.postal());
                debug!(customer_id = %known.id(), "filled blanks from known customer");
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "known-customer lookup failed"),
        }
    }

    fn item_at(&self, index: usize) -> IntakeResult<&PendingIntakeItem> {
        self.pending.get(index).ok_or(IntakeError::IndexOutOfRange {
            index,
            len: self.pending.len(),
        })
    }

    /// Replaces one field of the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::IndexOutOfRange`] for a stale index.
    pub fn edit(
        &mut self,
        index: usize,
        kind: FieldKind,
        value: impl Into<String>,
    ) -> IntakeResult<&PendingIntakeItem> {
        let len = self.pending.len();
        let item = self
            .pending
            .get_mut(index)
            .ok_or(IntakeError::IndexOutOfRange { index, len })?;
        item.edit(kind, value);
        Ok(item)
    }

    /// Validates, resolves and persists the item at `index`, then moves it
    /// from the pending list to the batch.
    ///
    /// On any error the pending list is left untouched so the item can be
    /// corrected and retried.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::IndexOutOfRange`],
    /// [`IntakeError::Domain`] when required fields are blank, or the
    /// customer and repository errors from persistence.
    pub async fn commit(
        &mut self,
        index: usize,
        created_by: Option<&str>,
    ) -> IntakeResult<CommittedPackage> {
        let item = self.item_at(index)?;
        item.validate_for_commit()?;

        let fields = item.fields();
        let postal = normalize_postal_code(&fields.postal, &self.postal_prefix);
        let phone = Some(fields.phone.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        let tracking = TrackingNumber::new(fields.tracking.as_str())?;
        let recipient = Recipient::new(fields.name.as_str(), phone.clone(), postal.as_str())?;

        let mut request = ResolveCustomerRequest::new(recipient.name()).with_postal(postal);
        if let Some(value) = phone {
            request = request.with_phone(value);
        }
        let customer = self.customers.resolve(request).await?;

        let package = Package::receive(
            ReceivePackage {
                courier: item.courier().clone(),
                tracking,
                customer_id: Some(customer.id()),
                recipient,
                label_image: item.label_image().cloned(),
                created_by: created_by.map(str::to_owned),
            },
            &*self.clock,
        );
        self.packages.store(&package).await?;

        self.pending.remove(index);
        info!(
            package_id = %package.id(),
            tracking = %package.tracking(),
            customer_id = %customer.id(),
            "package committed"
        );
        let committed = CommittedPackage { package, customer };
        self.batch.push(committed.clone());
        Ok(committed)
    }

    /// Discards the item at `index` without persisting it.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::IndexOutOfRange`] for a stale index.
    pub fn skip(&mut self, index: usize) -> IntakeResult<PendingIntakeItem> {
        self.item_at(index)?;
        let skipped = self.pending.remove(index);
        debug!(index, remaining = self.pending.len(), "pending item skipped");
        Ok(skipped)
    }

    /// Clears the pending and committed lists for a fresh intake round.
    pub fn reset_session(&mut self) {
        debug!(
            pending = self.pending.len(),
            committed = self.batch.len(),
            "intake session reset"
        );
        self.pending.clear();
        self.batch.clear();
    }

    /// Summarises the committed packages per customer.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::EmptyBatch`] when nothing was committed.
    pub fn finalize(&self) -> IntakeResult<BatchSummary> {
        if self.batch.is_empty() {
            return Err(IntakeError::EmptyBatch);
        }
        let summary = BatchSummary::from_committed(&self.batch);
        info!(
            packages = summary.total_packages,
            customers = summary.customer_count(),
            "intake batch finalized"
        );
        Ok(summary)
    }
}
