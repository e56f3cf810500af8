//! Extraction backends.

pub mod scripted;
pub mod text;
