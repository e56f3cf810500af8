//! Package persistence adapters.

pub mod memory;
pub mod postgres;
