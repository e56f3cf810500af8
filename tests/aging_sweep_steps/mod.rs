//! Step definitions for aging sweep scenarios.

mod given;
mod then;
mod when;
pub mod world;
