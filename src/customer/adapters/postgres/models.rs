//! Diesel row models for customer persistence.

use super::schema::customers;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for customer records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    /// Internal customer identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Case-folded name key.
    pub name_key: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional postal code.
    pub postal: Option<String>,
    /// City.
    pub city: String,
    /// Province.
    pub province: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for customer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow {
    /// Internal customer identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Case-folded name key.
    pub name_key: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional postal code.
    pub postal: Option<String>,
    /// City.
    pub city: String,
    /// Province.
    pub province: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
