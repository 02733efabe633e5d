//! Header grouping into per-language column sets and plain columns.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use qbank_common::normalize_header;
use qbank_model::Language;
use regex::Regex;
use serde::Serialize;

static LANGUAGE_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)_(en|te|hi|ta|ml|kn|gu|mr|bn|pa|ur|as|ks)$")
        .expect("Invalid language column regex")
});

/// Splits a normalized `<base>_<lang>` header into its base and language.
///
/// Returns `None` for headers without a recognised language suffix.
///
/// # Examples
///
/// ```
/// use qbank_map::parse_language_column;
/// use qbank_model::Language;
///
/// assert_eq!(
///     parse_language_column("question_te"),
///     Some(("question".to_string(), Language::Te))
/// );
/// assert_eq!(parse_language_column("option_a"), None);
/// ```
pub fn parse_language_column(normalized: &str) -> Option<(String, Language)> {
    let captures = LANGUAGE_COLUMN.captures(normalized)?;
    let base = captures.get(1)?.as_str().to_lowercase();
    let language = Language::from_code(captures.get(2)?.as_str())?;
    Some((base, language))
}

/// Headers of one source, split by shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderGroups {
    /// `base -> language -> normalized header`.
    pub bilingual: BTreeMap<String, BTreeMap<Language, String>>,
    /// `normalized header -> raw header` for everything else.
    pub single: BTreeMap<String, String>,
}

impl HeaderGroups {
    pub fn has_single(&self, normalized: &str) -> bool {
        self.single.contains_key(normalized)
    }

    pub fn bilingual_group(&self, base: &str) -> Option<&BTreeMap<Language, String>> {
        self.bilingual.get(base)
    }
}

/// Normalizes every header and files it as bilingual or single.
///
/// Blank headers are ignored. When two raw headers normalize to the same
/// name, the later one wins.
pub fn group_headers<S: AsRef<str>>(headers: &[S]) -> HeaderGroups {
    let mut groups = HeaderGroups::default();
    for raw in headers {
        let raw = raw.as_ref();
        let normalized = normalize_header(Some(raw));
        if normalized.is_empty() {
            continue;
        }
        match parse_language_column(&normalized) {
            Some((base, language)) => {
                groups
                    .bilingual
                    .entry(base)
                    .or_default()
                    .insert(language, normalized);
            }
            None => {
                groups.single.insert(normalized, raw.to_string());
            }
        }
    }
    groups
}
