//! Package records and their pickup lifecycle.
//!
//! A package enters the system awaiting pickup when intake commits it and
//! then moves to picked up, sent back or refused. The lifecycle service owns
//! status changes and the aging sweep that finds packages waiting past the
//! return-to-sender threshold; the archive service is the read side.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
