//! Domain model for customers.

mod customer;
mod error;
mod ids;

pub use customer::{ContactDetails, Customer, PersistedCustomerData};
pub use error::CustomerDomainError;
pub use ids::{CustomerId, CustomerName, CustomerNameKey};
