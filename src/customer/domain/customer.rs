//! Customer aggregate.

use super::{CustomerId, CustomerName, CustomerNameKey};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Contact and location details captured when the customer is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    phone: Option<String>,
    postal: Option<String>,
    city: String,
    province: String,
}

impl ContactDetails {
    /// Creates contact details. Blank phone and postal values are dropped.
    #[must_use]
    pub fn new(
        phone: Option<String>,
        postal: Option<String>,
        city: impl Into<String>,
        province: impl Into<String>,
    ) -> Self {
        Self {
            phone: non_blank(phone),
            postal: non_blank(postal),
            city: city.into(),
            province: province.into(),
        }
    }

    /// Returns the phone number, if known.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the postal code, if known.
    #[must_use]
    pub fn postal(&self) -> Option<&str> {
        self.postal.as_deref()
    }

    /// Returns the city.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the province.
    #[must_use]
    pub fn province(&self) -> &str {
        &self.province
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Customer aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: CustomerName,
    name_key: CustomerNameKey,
    contact: ContactDetails,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCustomerData {
    /// Persisted identifier.
    pub id: CustomerId,
    /// Persisted display name.
    pub name: CustomerName,
    /// Persisted contact details.
    pub contact: ContactDetails,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer.
    #[must_use]
    pub fn new(name: CustomerName, contact: ContactDetails, clock: &impl Clock) -> Self {
        let name_key = name.key();
        Self {
            id: CustomerId::new(),
            name,
            name_key,
            contact,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a customer from persisted storage.
    ///
    /// The name key is always recomputed from the name.
    #[must_use]
    pub fn from_persisted(data: PersistedCustomerData) -> Self {
        let name_key = data.name.key();
        Self {
            id: data.id,
            name: data.name,
            name_key,
            contact: data.contact,
            created_at: data.created_at,
        }
    }

    /// Returns the customer identifier.
    #[must_use]
    pub const fn id(&self) -> CustomerId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &CustomerName {
        &self.name
    }

    /// Returns the lookup key.
    #[must_use]
    pub const fn name_key(&self) -> &CustomerNameKey {
        &self.name_key
    }

    /// Returns contact details.
    #[must_use]
    pub const fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
