//! Port contracts for customer persistence.

pub mod repository;

pub use repository::{CustomerRepository, CustomerRepositoryError, CustomerRepositoryResult};
