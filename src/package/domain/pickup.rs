//! Pickup visits: who collected which packages, and on what identification.

use super::{PackageDomainError, PackageId, PickupId};
use crate::customer::domain::CustomerId;
use crate::media::domain::ImageRef;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Person collecting packages at the counter.
///
/// Identification details are optional; blank values are stored as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collector {
    name: String,
    id_type: Option<String>,
    id_number: Option<String>,
}

impl Collector {
    /// Creates a validated collector.
    ///
    /// # Errors
    ///
    /// Returns [`PackageDomainError::EmptyCollectorName`] when the name is
    /// blank.
    pub fn new(
        name: impl Into<String>,
        id_type: Option<String>,
        id_number: Option<String>,
    ) -> Result<Self, PackageDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PackageDomainError::EmptyCollectorName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            id_type: non_blank(id_type),
            id_number: non_blank(id_number),
        })
    }

    /// Returns the collector's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind of identification shown, such as a driver's licence.
    #[must_use]
    pub fn id_type(&self) -> Option<&str> {
        self.id_type.as_deref()
    }

    /// Returns the identification number shown.
    #[must_use]
    pub fn id_number(&self) -> Option<&str> {
        self.id_number.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// What staff capture when a customer collects packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupRequest {
    /// Customer whose packages are collected.
    pub customer_id: CustomerId,
    /// Person at the counter.
    pub collector: Collector,
    /// Signature captured for the whole visit.
    pub signature: Option<ImageRef>,
}

/// A completed pickup visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickup {
    id: PickupId,
    customer_id: CustomerId,
    customer_name: String,
    collector: Collector,
    signature: Option<ImageRef>,
    package_ids: Vec<PackageId>,
    picked_up_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted pickup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPickupData {
    /// Persisted identifier.
    pub id: PickupId,
    /// Persisted customer link.
    pub customer_id: CustomerId,
    /// Persisted customer name snapshot.
    pub customer_name: String,
    /// Persisted collector.
    pub collector: Collector,
    /// Persisted signature image reference.
    pub signature: Option<ImageRef>,
    /// Persisted collected packages.
    pub package_ids: Vec<PackageId>,
    /// Persisted pickup timestamp.
    pub picked_up_at: DateTime<Utc>,
}

impl Pickup {
    /// Records a visit that collected `package_ids`.
    ///
    /// `customer_name` is a snapshot of the recipient name on the packages.
    #[must_use]
    pub fn record(
        request: PickupRequest,
        customer_name: impl Into<String>,
        package_ids: Vec<PackageId>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: PickupId::new(),
            customer_id: request.customer_id,
            customer_name: customer_name.into(),
            collector: request.collector,
            signature: request.signature,
            package_ids,
            picked_up_at: clock.utc(),
        }
    }

    /// Reconstructs a pickup from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPickupData) -> Self {
        Self {
            id: data.id,
            customer_id: data.customer_id,
            customer_name: data.customer_name,
            collector: data.collector,
            signature: data.signature,
            package_ids: data.package_ids,
            picked_up_at: data.picked_up_at,
        }
    }

    /// Returns the pickup identifier.
    #[must_use]
    pub const fn id(&self) -> PickupId {
        self.id
    }

    /// Returns the customer whose packages were collected.
    #[must_use]
    pub const fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the recipient name on the collected packages.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Returns who collected the packages.
    #[must_use]
    pub const fn collector(&self) -> &Collector {
        &self.collector
    }

    /// Returns the signature captured for the visit.
    #[must_use]
    pub const fn signature(&self) -> Option<&ImageRef> {
        self.signature.as_ref()
    }

    /// Returns the packages collected, in request order.
    #[must_use]
    pub fn package_ids(&self) -> &[PackageId] {
        &self.package_ids
    }

    /// Returns when the visit was recorded.
    #[must_use]
    pub const fn picked_up_at(&self) -> DateTime<Utc> {
        self.picked_up_at
    }
}
