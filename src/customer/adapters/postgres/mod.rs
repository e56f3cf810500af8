//! `PostgreSQL` adapters for customer persistence.

mod models;
mod repository;
mod schema;

pub use repository::{CustomerPgPool, PostgresCustomerRepository};
