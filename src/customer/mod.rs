//! Customer identity resolution.
//!
//! Packages are attached to a customer identified by the recipient name as
//! printed on the label. Matching is exact after trimming and case folding;
//! the first package under an unseen name creates the customer. The storage
//! layer guarantees at most one customer per name key, so concurrent intake
//! sessions cannot create duplicates.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
