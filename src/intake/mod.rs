//! Label intake: extraction, field reconciliation and the batch session.
//!
//! Staff photograph a stack of labels, the extraction backend proposes the
//! recipient fields, staff correct what it missed and commit each item.
//! Committing resolves the customer and persists the package; the session
//! then summarises the batch per customer.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Extraction backends in [`adapters`]
//! - The extraction adapter and batch controller in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
