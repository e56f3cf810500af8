//! Find-or-create resolution of customer identity by name.

use crate::config::LocationConfig;
use crate::customer::{
    domain::{ContactDetails, Customer, CustomerDomainError, CustomerName},
    ports::{CustomerRepository, CustomerRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload describing the recipient on the label being committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveCustomerRequest {
    name: String,
    phone: Option<String>,
    postal: Option<String>,
}

impl ResolveCustomerRequest {
    /// Creates a request for the given recipient name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
            postal: None,
        }
    }

    /// Sets the phone number used if a customer is created.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the postal code used if a customer is created.
    #[must_use]
    pub fn with_postal(mut self, postal: impl Into<String>) -> Self {
        self.postal = Some(postal.into());
        self
    }
}

/// Service-level errors for customer resolution.
#[derive(Debug, Clone, Error)]
pub enum CustomerResolverError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CustomerDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CustomerRepositoryError),
}

/// Result type for customer resolution.
pub type CustomerResolverResult<T> = Result<T, CustomerResolverError>;

/// Resolves a recipient name to a single customer record.
#[derive(Clone)]
pub struct CustomerResolver<R, C>
where
    R: CustomerRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    location: LocationConfig,
}

impl<R, C> CustomerResolver<R, C>
where
    R: CustomerRepository,
    C: Clock + Send + Sync,
{
    /// Creates a resolver using the default location.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            location: LocationConfig::default(),
        }
    }

    /// Sets the city and province stamped on newly created customers.
    #[must_use]
    pub fn with_location(mut self, location: LocationConfig) -> Self {
        self.location = location;
        self
    }

    /// Returns the underlying repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Finds the customer whose name matches case-insensitively, creating it
    /// when none exists.
    ///
    /// Phone and postal values only populate a newly created customer; an
    /// existing customer is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerResolverError::Domain`] for a blank name and
    /// [`CustomerResolverError::Repository`] when persistence fails.
    pub async fn resolve(&self, request: ResolveCustomerRequest) -> CustomerResolverResult<Customer> {
        let name = CustomerName::new(request.name)?;

        if let Some(existing) = self.repository.find_by_name_key(&name.key()).await? {
            warn_on_phone_mismatch(&existing, request.phone.as_deref());
            debug!(customer_id = %existing.id(), name = %existing.name(), "matched existing customer");
            return Ok(existing);
        }

        let contact = ContactDetails::new(
            request.phone,
            request.postal,
            self.location.city.clone(),
            self.location.province.clone(),
        );
        let candidate = Customer::new(name, contact, &*self.clock);
        let resolved = self.repository.find_or_create(&candidate).await?;

        if resolved.id() == candidate.id() {
            info!(customer_id = %resolved.id(), name = %resolved.name(), "created customer");
        } else {
            debug!(customer_id = %resolved.id(), "customer created concurrently; reusing");
        }
        Ok(resolved)
    }
}

fn warn_on_phone_mismatch(existing: &Customer, phone: Option<&str>) {
    let incoming = phone.map(str::trim).filter(|value| !value.is_empty());
    if let (Some(stored), Some(seen)) = (existing.contact().phone(), incoming) {
        if stored != seen {
            warn!(
                customer_id = %existing.id(),
                name = %existing.name(),
                "label phone differs from customer record; same name may belong to another person"
            );
        }
    }
}
