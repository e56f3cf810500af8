//! Diesel row models for package persistence.

use super::schema::{packages, pickups};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for package records, used for both reads and writes.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = packages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct PackageRow {
    /// Internal package identifier.
    pub id: uuid::Uuid,
    /// Delivering courier.
    pub courier: String,
    /// Tracking number.
    pub tracking: String,
    /// Linked customer.
    pub customer_id: Option<uuid::Uuid>,
    /// Recipient name.
    pub name: String,
    /// Recipient phone.
    pub phone: Option<String>,
    /// Postal code.
    pub postal: String,
    /// Label image reference.
    pub label_image: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Receiving staff member.
    pub created_by: Option<String>,
    /// Receipt timestamp.
    pub created_at: DateTime<Utc>,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Pickup timestamp.
    pub signed_at: Option<DateTime<Utc>>,
    /// Signature image reference.
    pub signature_image: Option<String>,
}

/// Row model for pickup visits.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pickups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PickupRow {
    /// Pickup identifier.
    pub id: uuid::Uuid,
    /// Linked customer.
    pub customer_id: uuid::Uuid,
    /// Recipient name snapshot.
    pub customer_name: String,
    /// Collector name.
    pub collector_name: String,
    /// Identification type.
    pub id_type: Option<String>,
    /// Identification number.
    pub id_number: Option<String>,
    /// Signature image reference.
    pub signature_image: Option<String>,
    /// Collected packages.
    pub package_ids: Vec<uuid::Uuid>,
    /// Pickup timestamp.
    pub picked_up_at: DateTime<Utc>,
}
