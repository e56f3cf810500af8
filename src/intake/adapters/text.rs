//! Extraction by parsing the text an OCR engine recognised on the label.

use crate::intake::{
    domain::ExtractedFields,
    ports::{ExtractionResult, LabelExtractor, TextRecognizer},
};
use crate::media::domain::LabelImage;
use crate::package::domain::Courier;
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Courier names recognised on labels, checked in order.
const COURIER_KEYWORDS: &[(&str, &[&str])] = &[
    ("Purolator", &["PUROLATOR"]),
    ("FedEx", &["FEDEX", "FED EX"]),
    ("UPS", &["UPS"]),
    ("Canada Post", &["CANADA POST", "POSTES CANADA"]),
    ("Dragonfly", &["DRAGONFLY"]),
];

/// Words that mark a line as label boilerplate rather than a name.
const NON_NAME_KEYWORDS: &[&str] = &[
    "TRACKING",
    "DELIVERY",
    "SHIP",
    "FROM",
    "PUROLATOR",
    "FEDEX",
    "FED EX",
    "UPS",
    "CANADA POST",
    "POSTES CANADA",
    "DRAGONFLY",
];

/// Returns the courier whose name appears in `text`, if any.
#[must_use]
pub fn detect_courier(text: &str) -> Option<&'static str> {
    let upper = text.to_uppercase();
    COURIER_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| upper.contains(keyword)))
        .map(|(courier, _)| *courier)
}

/// Fields parsed from label text together with the courier named on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLabel {
    /// Courier detected from label keywords.
    pub courier: Option<&'static str>,
    /// Recipient fields.
    pub fields: ExtractedFields,
}

/// Compiled patterns for label text.
#[derive(Debug, Clone)]
pub struct LabelPatterns {
    tracking: [Regex; 3],
    postal: Regex,
    phone: [Regex; 2],
}

impl LabelPatterns {
    /// Compiles the label patterns.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error.
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            tracking: [
                Regex::new(r"\b[0-9]{12,}\b")?,
                Regex::new(r"\b[0-9]{4}\s?[0-9]{4}\s?[0-9]{4}\b")?,
                Regex::new(r"\b[A-Z0-9]{10,}\b")?,
            ],
            postal: Regex::new(r"\b[A-Z][0-9][A-Z]\s?[0-9][A-Z][0-9]\b")?,
            phone: [
                Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b")?,
                Regex::new(r"\(\d{3}\)\s?\d{3}[-.]?\d{4}")?,
            ],
        })
    }

    /// Parses recognised text lines into recipient fields.
    ///
    /// Tracking numbers try long numeric runs, then three groups of four
    /// digits, then uppercase alphanumeric runs of ten or more; spaces are
    /// removed from the match. The name is the first line of 4 to 49
    /// characters that is mostly letters and holds no label keyword.
    #[must_use]
    pub fn parse(&self, lines: &[String]) -> ParsedLabel {
        let text = lines.join("\n");
        let upper = text.to_uppercase();

        let tracking = first_match(&self.tracking, &text)
            .map(|found| found.chars().filter(|c| !c.is_whitespace()).collect())
            .unwrap_or_default();
        let postal = self
            .postal
            .find(&upper)
            .map(|found| found.as_str().to_owned())
            .unwrap_or_default();
        let phone = first_match(&self.phone, &text)
            .map(str::to_owned)
            .unwrap_or_default();
        let name = lines
            .iter()
            .map(|line| line.trim())
            .find(|line| looks_like_name(line))
            .map(str::to_owned)
            .unwrap_or_default();

        ParsedLabel {
            courier: detect_courier(&text),
            fields: ExtractedFields {
                name,
                tracking,
                phone,
                postal,
            },
        }
    }
}

fn first_match<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|found| found.as_str())
}

fn looks_like_name(line: &str) -> bool {
    let len = line.chars().count();
    if !(4..50).contains(&len) {
        return false;
    }
    let alphabetic = line.chars().filter(|c| c.is_alphabetic()).count();
    if alphabetic * 5 <= len * 3 {
        return false;
    }
    let upper = line.to_uppercase();
    !NON_NAME_KEYWORDS
        .iter()
        .any(|keyword| upper.contains(keyword))
}

/// Label extractor backed by an OCR engine and pattern parsing.
pub struct TextLabelExtractor<R>
where
    R: TextRecognizer,
{
    recognizer: Arc<R>,
    patterns: LabelPatterns,
}

impl<R> TextLabelExtractor<R>
where
    R: TextRecognizer,
{
    /// Creates an extractor over `recognizer`.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error.
    pub fn new(recognizer: Arc<R>) -> Result<Self, regex::Error> {
        Ok(Self {
            recognizer,
            patterns: LabelPatterns::compile()?,
        })
    }
}

#[async_trait]
impl<R> LabelExtractor for TextLabelExtractor<R>
where
    R: TextRecognizer,
{
    async fn extract(
        &self,
        image: &LabelImage,
        courier: &Courier,
    ) -> ExtractionResult<ExtractedFields> {
        let lines = self.recognizer.recognize(image).await?;
        debug!(lines = lines.len(), "label text recognised");
        let parsed = self.patterns.parse(&lines);
        if let Some(detected) = parsed.courier {
            if !detected.eq_ignore_ascii_case(courier.as_str()) {
                warn!(
                    selected = %courier,
                    detected,
                    "label names a different courier than the one selected"
                );
            }
        }
        Ok(parsed.fields)
    }
}
