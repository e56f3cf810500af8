//! In-memory customer repository for tests and local use.

use crate::customer::{
    domain::{Customer, CustomerId, CustomerNameKey},
    ports::{CustomerRepository, CustomerRepositoryError, CustomerRepositoryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory customer repository.
///
/// The name index is updated under the same write lock as the customer map,
/// which makes [`CustomerRepository::find_or_create`] atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    state: Arc<RwLock<InMemoryCustomerState>>,
}

#[derive(Debug, Default)]
struct InMemoryCustomerState {
    customers: HashMap<CustomerId, Customer>,
    name_index: HashMap<CustomerNameKey, CustomerId>,
}

impl InMemoryCustomerRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored customer in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn all(&self) -> CustomerRepositoryResult<Vec<Customer>> {
        let state = self.state.read().map_err(|err| {
            CustomerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.customers.values().cloned().collect())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_or_create(&self, candidate: &Customer) -> CustomerRepositoryResult<Customer> {
        let mut state = self.state.write().map_err(|err| {
            CustomerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let existing = state
            .name_index
            .get(candidate.name_key())
            .and_then(|id| state.customers.get(id))
            .cloned();
        if let Some(customer) = existing {
            return Ok(customer);
        }

        state
            .name_index
            .insert(candidate.name_key().clone(), candidate.id());
        state.customers.insert(candidate.id(), candidate.clone());
        Ok(candidate.clone())
    }

    async fn find_by_name_key(
        &self,
        key: &CustomerNameKey,
    ) -> CustomerRepositoryResult<Option<Customer>> {
        let state = self.state.read().map_err(|err| {
            CustomerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .name_index
            .get(key)
            .and_then(|id| state.customers.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: CustomerId) -> CustomerRepositoryResult<Option<Customer>> {
        let state = self.state.read().map_err(|err| {
            CustomerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.customers.get(&id).cloned())
    }
}
