//! Package aggregate root.

use super::{Courier, PackageDomainError, PackageId, PackageStatus, TrackingNumber};
use crate::customer::domain::CustomerId;
use crate::media::domain::ImageRef;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Recipient details as printed on the label at intake time.
///
/// These are snapshots; later changes to the customer record do not alter
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    name: String,
    phone: Option<String>,
    postal: String,
}

impl Recipient {
    /// Creates a validated recipient snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`PackageDomainError::EmptyRecipientName`] or
    /// [`PackageDomainError::EmptyPostalCode`] for blank required values.
    pub fn new(
        name: impl Into<String>,
        phone: Option<String>,
        postal: impl Into<String>,
    ) -> Result<Self, PackageDomainError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(PackageDomainError::EmptyRecipientName);
        }
        let postal = postal.into().trim().to_owned();
        if postal.is_empty() {
            return Err(PackageDomainError::EmptyPostalCode);
        }
        let phone = phone
            .map(|raw| raw.trim().to_owned())
            .filter(|trimmed| !trimmed.is_empty());
        Ok(Self {
            name,
            phone,
            postal,
        })
    }

    /// Returns the recipient name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the recipient phone number, if printed.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the postal code.
    #[must_use]
    pub fn postal(&self) -> &str {
        &self.postal
    }
}

/// Parameter object for receiving a new package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivePackage {
    /// Delivering courier.
    pub courier: Courier,
    /// Tracking number.
    pub tracking: TrackingNumber,
    /// Resolved customer, if any.
    pub customer_id: Option<CustomerId>,
    /// Recipient snapshot.
    pub recipient: Recipient,
    /// Stored label photograph.
    pub label_image: Option<ImageRef>,
    /// Staff member who received the package.
    pub created_by: Option<String>,
}

/// Package aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    id: PackageId,
    courier: Courier,
    tracking: TrackingNumber,
    customer_id: Option<CustomerId>,
    recipient: Recipient,
    label_image: Option<ImageRef>,
    status: PackageStatus,
    created_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    signed_at: Option<DateTime<Utc>>,
    signature_image: Option<ImageRef>,
}

/// Parameter object for reconstructing a persisted package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPackageData {
    /// Persisted identifier.
    pub id: PackageId,
    /// Persisted courier.
    pub courier: Courier,
    /// Persisted tracking number.
    pub tracking: TrackingNumber,
    /// Persisted customer link.
    pub customer_id: Option<CustomerId>,
    /// Persisted recipient snapshot.
    pub recipient: Recipient,
    /// Persisted label image reference.
    pub label_image: Option<ImageRef>,
    /// Persisted status.
    pub status: PackageStatus,
    /// Persisted receiving staff member.
    pub created_by: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted pickup timestamp.
    pub signed_at: Option<DateTime<Utc>>,
    /// Persisted signature image reference.
    pub signature_image: Option<ImageRef>,
}

impl Package {
    /// Receives a package onto the shelf, awaiting pickup.
    #[must_use]
    pub fn receive(params: ReceivePackage, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: PackageId::new(),
            courier: params.courier,
            tracking: params.tracking,
            customer_id: params.customer_id,
            recipient: params.recipient,
            label_image: params.label_image,
            status: PackageStatus::AvailableForPickup,
            created_by: params
                .created_by
                .map(|raw| raw.trim().to_owned())
                .filter(|trimmed| !trimmed.is_empty()),
            created_at: timestamp,
            updated_at: timestamp,
            signed_at: None,
            signature_image: None,
        }
    }

    /// Reconstructs a package from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPackageData) -> Self {
        Self {
            id: data.id,
            courier: data.courier,
            tracking: data.tracking,
            customer_id: data.customer_id,
            recipient: data.recipient,
            label_image: data.label_image,
            status: data.status,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
            signed_at: data.signed_at,
            signature_image: data.signature_image,
        }
    }

    /// Returns the package identifier.
    #[must_use]
    pub const fn id(&self) -> PackageId {
        self.id
    }

    /// Returns the courier.
    #[must_use]
    pub const fn courier(&self) -> &Courier {
        &self.courier
    }

    /// Returns the tracking number.
    #[must_use]
    pub const fn tracking(&self) -> &TrackingNumber {
        &self.tracking
    }

    /// Returns the linked customer, if resolved.
    #[must_use]
    pub const fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    /// Returns the recipient snapshot.
    #[must_use]
    pub const fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    /// Returns the label photograph reference.
    #[must_use]
    pub const fn label_image(&self) -> Option<&ImageRef> {
        self.label_image.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> PackageStatus {
        self.status
    }

    /// Returns the receiving staff member.
    #[must_use]
    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    /// Returns when the package was received. Fixed for the package's life.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the package was picked up.
    #[must_use]
    pub const fn signed_at(&self) -> Option<DateTime<Utc>> {
        self.signed_at
    }

    /// Returns the pickup signature reference.
    #[must_use]
    pub const fn signature_image(&self) -> Option<&ImageRef> {
        self.signature_image.as_ref()
    }

    /// Overwrites the status without consulting the transition table.
    ///
    /// Moving to [`PackageStatus::PickedUp`] stamps the pickup time when none
    /// is recorded yet.
    pub fn set_status(&mut self, status: PackageStatus, clock: &impl Clock) {
        let now = clock.utc();
        if status == PackageStatus::PickedUp && self.signed_at.is_none() {
            self.signed_at = Some(now);
        }
        self.status = status;
        self.updated_at = now;
    }

    /// Changes status only when [`PackageStatus::can_transition_to`] allows
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`PackageDomainError::InvalidStatusTransition`] otherwise.
    pub fn transition_to(
        &mut self,
        status: PackageStatus,
        clock: &impl Clock,
    ) -> Result<(), PackageDomainError> {
        if !self.status.can_transition_to(status) {
            return Err(PackageDomainError::InvalidStatusTransition {
                package_id: self.id,
                from: self.status,
                to: status,
            });
        }
        self.set_status(status, clock);
        Ok(())
    }

    /// Records the pickup signature and stamps the pickup time.
    pub fn attach_signature(&mut self, signature: ImageRef, clock: &impl Clock) {
        let now = clock.utc();
        self.signature_image = Some(signature);
        self.signed_at = Some(now);
        self.updated_at = now;
    }

    /// Returns how long the package has been on the shelf at `now`.
    #[must_use]
    pub fn waiting_time(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.created_at
    }

    /// Returns `true` when the package still awaits pickup and has waited at
    /// least `threshold`.
    #[must_use]
    pub fn is_aged(&self, now: DateTime<Utc>, threshold: TimeDelta) -> bool {
        self.status == PackageStatus::AvailableForPickup && self.waiting_time(now) >= threshold
    }
}
