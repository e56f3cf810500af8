//! `PostgreSQL` adapters for package persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PackagePgPool, PostgresPackageRepository};
