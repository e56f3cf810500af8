//! Immutable view models handed to the UI layer.

use super::{Package, PackageId, PackageStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of a package for list and card views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageView {
    /// Package identifier.
    pub id: PackageId,
    /// Courier name.
    pub courier: String,
    /// Tracking number.
    pub tracking: String,
    /// Recipient name.
    pub name: String,
    /// Recipient phone, if known.
    pub phone: Option<String>,
    /// Postal code.
    pub postal: String,
    /// Lifecycle status.
    pub status: PackageStatus,
    /// Staff-facing status label.
    pub status_label: &'static str,
    /// When the package was received.
    pub received_at: DateTime<Utc>,
    /// When the package was picked up.
    pub picked_up_at: Option<DateTime<Utc>>,
    /// Whole days the package has waited, as of the view's creation.
    pub days_waiting: i64,
    /// Whether a label photograph is stored.
    pub has_label_image: bool,
    /// Whether a pickup signature is stored.
    pub has_signature: bool,
}

impl PackageView {
    /// Builds a view of `package` as of `now`.
    #[must_use]
    pub fn from_package(package: &Package, now: DateTime<Utc>) -> Self {
        let recipient = package.recipient();
        Self {
            id: package.id(),
            courier: package.courier().as_str().to_owned(),
            tracking: package.tracking().as_str().to_owned(),
            name: recipient.name().to_owned(),
            phone: recipient.phone().map(str::to_owned),
            postal: recipient.postal().to_owned(),
            status: package.status(),
            status_label: package.status().label(),
            received_at: package.created_at(),
            picked_up_at: package.signed_at(),
            days_waiting: package.waiting_time(now).num_days().max(0),
            has_label_image: package.label_image().is_some(),
            has_signature: package.signature_image().is_some(),
        }
    }

    /// Builds views for a list of packages, preserving order.
    #[must_use]
    pub fn list(packages: &[Package], now: DateTime<Utc>) -> Vec<Self> {
        packages
            .iter()
            .map(|package| Self::from_package(package, now))
            .collect()
    }
}

/// Public tracking lookup result; omits contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingView {
    /// Courier name.
    pub courier: String,
    /// Recipient name.
    pub name: String,
    /// Tracking number.
    pub tracking: String,
    /// Lifecycle status.
    pub status: PackageStatus,
    /// When the package was received.
    pub received_at: DateTime<Utc>,
    /// When the package was picked up.
    pub picked_up_at: Option<DateTime<Utc>>,
}

impl From<&Package> for TrackingView {
    fn from(package: &Package) -> Self {
        Self {
            courier: package.courier().as_str().to_owned(),
            name: package.recipient().name().to_owned(),
            tracking: package.tracking().as_str().to_owned(),
            status: package.status(),
            received_at: package.created_at(),
            picked_up_at: package.signed_at(),
        }
    }
}
