//! Header and cell text normalization.
//!
//! Header comparison throughout the importer is done on the output of
//! [`normalize_header`], so both the header resolver and the row processor
//! must go through this module to stay in agreement.

/// The Unicode byte-order mark.
pub const BOM: char = '\u{feff}';

/// UTF-8 encoding of [`BOM`].
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Normalizes a header for comparison: lowercased and trimmed.
///
/// Stray byte-order marks are trimmed along with whitespace. Absent headers
/// normalize to the empty string. The function is idempotent.
///
/// # Examples
///
/// ```
/// use qbank_common::normalize_header;
///
/// assert_eq!(normalize_header(Some("  Question_EN ")), "question_en");
/// assert_eq!(normalize_header(None), "");
/// ```
pub fn normalize_header(raw: Option<&str>) -> String {
    match raw {
        Some(value) => value
            .to_lowercase()
            .trim_matches(|c: char| c.is_whitespace() || c == BOM)
            .to_string(),
        None => String::new(),
    }
}

/// Removes a single leading byte-order mark, if present.
///
/// # Examples
///
/// ```
/// use qbank_common::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}Hello"), "Hello");
/// assert_eq!(strip_bom("Hello"), "Hello");
/// ```
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Removes a leading UTF-8 byte-order mark from raw bytes.
pub fn strip_bom_bytes(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Trims a cell value, returning `None` when nothing is left.
pub fn clean_cell(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
