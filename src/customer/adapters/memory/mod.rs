//! In-memory customer adapters.

mod customer;

pub use customer::InMemoryCustomerRepository;
