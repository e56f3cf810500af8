//! Intake orchestration services.

mod batch;
mod extraction;

pub use batch::{BatchController, IntakeError, IntakeResult};
pub use extraction::ExtractionAdapter;
