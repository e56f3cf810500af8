//! Postal code normalisation applied at commit time.

/// Normalises a postal code typed or extracted from a label.
///
/// The value is uppercased with spaces removed. A three-character value is
/// taken as the local delivery unit and prefixed with `prefix`; a
/// six-character value gets the conventional middle space. Anything else is
/// returned uppercased. Blank input stays blank.
#[must_use]
pub fn normalize_postal_code(raw: &str, prefix: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    match compact.chars().count() {
        0 => String::new(),
        3 => format!("{} {compact}", prefix.trim().to_uppercase()),
        6 => {
            let forward: String = compact.chars().take(3).collect();
            let local: String = compact.chars().skip(3).collect();
            format!("{forward} {local}")
        }
        _ => compact,
    }
}
