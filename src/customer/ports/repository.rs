//! Repository port for customer lookup and creation.

use crate::customer::domain::{Customer, CustomerId, CustomerNameKey};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for customer repository operations.
pub type CustomerRepositoryResult<T> = Result<T, CustomerRepositoryError>;

/// Customer persistence contract.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Returns the customer stored under the candidate's name key, storing
    /// the candidate first if no such customer exists.
    ///
    /// Implementations must make the lookup and insert atomic with respect to
    /// other callers: two concurrent calls with the same name key return the
    /// same customer.
    async fn find_or_create(&self, candidate: &Customer) -> CustomerRepositoryResult<Customer>;

    /// Finds a customer by name key.
    async fn find_by_name_key(
        &self,
        key: &CustomerNameKey,
    ) -> CustomerRepositoryResult<Option<Customer>>;

    /// Finds a customer by identifier.
    async fn find_by_id(&self, id: CustomerId) -> CustomerRepositoryResult<Option<Customer>>;
}

/// Errors returned by customer repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CustomerRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CustomerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
