//! Port contracts for label extraction.

mod extractor;

pub use extractor::{ExtractionError, ExtractionResult, LabelExtractor, TextRecognizer};
