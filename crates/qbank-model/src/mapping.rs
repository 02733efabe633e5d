//! Header mapping: which source columns feed each logical field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{Language, LogicalField};

/// How one logical field is read from a record.
///
/// All header names stored here are normalized (see
/// [`qbank_common::normalize_header`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldMapping {
    /// One column per language, merged into a single value.
    Bilingual {
        base: String,
        per_language: BTreeMap<Language, String>,
    },
    /// Candidate columns tried in priority order; the first non-blank wins.
    SingleCandidate { candidates: Vec<String> },
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::none()
    }
}

impl FieldMapping {
    pub fn single(candidate: impl Into<String>) -> Self {
        Self::SingleCandidate {
            candidates: vec![candidate.into()],
        }
    }

    pub fn none() -> Self {
        Self::SingleCandidate {
            candidates: Vec::new(),
        }
    }

    pub fn is_bilingual(&self) -> bool {
        matches!(self, Self::Bilingual { .. })
    }

    /// True when the mapping names no source column at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bilingual { per_language, .. } => per_language.is_empty(),
            Self::SingleCandidate { candidates } => candidates.is_empty(),
        }
    }

    /// Source headers in lookup order.
    pub fn source_headers(&self) -> Vec<&str> {
        match self {
            Self::Bilingual { per_language, .. } => {
                per_language.values().map(String::as_str).collect()
            }
            Self::SingleCandidate { candidates } => {
                candidates.iter().map(String::as_str).collect()
            }
        }
    }
}

/// Mapping for all six logical fields, built once per import batch.
///
/// Every mandatory field maps to a non-empty [`FieldMapping`]; `answer` may be
/// empty, in which case every row fails answer validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMapping {
    pub question: FieldMapping,
    pub option_a: FieldMapping,
    pub option_b: FieldMapping,
    pub option_c: FieldMapping,
    pub option_d: FieldMapping,
    pub answer: FieldMapping,
}

impl HeaderMapping {
    /// Mapping that tries every known alias of every field.
    ///
    /// Used for pre-shaped candidate records, whose keys are fixed by the
    /// producer rather than by a header row.
    pub fn canonical() -> Self {
        let aliases = |field: LogicalField| FieldMapping::SingleCandidate {
            candidates: field.aliases().iter().map(|a| (*a).to_string()).collect(),
        };
        Self {
            question: aliases(LogicalField::Question),
            option_a: aliases(LogicalField::OptionA),
            option_b: aliases(LogicalField::OptionB),
            option_c: aliases(LogicalField::OptionC),
            option_d: aliases(LogicalField::OptionD),
            answer: aliases(LogicalField::Answer),
        }
    }

    pub fn get(&self, field: LogicalField) -> &FieldMapping {
        match field {
            LogicalField::Question => &self.question,
            LogicalField::OptionA => &self.option_a,
            LogicalField::OptionB => &self.option_b,
            LogicalField::OptionC => &self.option_c,
            LogicalField::OptionD => &self.option_d,
            LogicalField::Answer => &self.answer,
        }
    }

    pub fn get_mut(&mut self, field: LogicalField) -> &mut FieldMapping {
        match field {
            LogicalField::Question => &mut self.question,
            LogicalField::OptionA => &mut self.option_a,
            LogicalField::OptionB => &mut self.option_b,
            LogicalField::OptionC => &mut self.option_c,
            LogicalField::OptionD => &mut self.option_d,
            LogicalField::Answer => &mut self.answer,
        }
    }

    /// Fields resolved through per-language columns.
    pub fn bilingual_fields(&self) -> Vec<LogicalField> {
        LogicalField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_bilingual())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_mapping_covers_all_aliases() {
        let mapping = HeaderMapping::canonical();
        for field in LogicalField::ALL {
            let headers = mapping.get(field).source_headers();
            assert_eq!(headers, field.aliases().to_vec());
        }
        assert!(mapping.bilingual_fields().is_empty());
    }

    #[test]
    fn bilingual_sources_follow_language_priority() {
        let mut per_language = BTreeMap::new();
        per_language.insert(Language::Te, "question_te".to_string());
        per_language.insert(Language::En, "question_en".to_string());
        let mapping = FieldMapping::Bilingual {
            base: "question".to_string(),
            per_language,
        };
        assert_eq!(mapping.source_headers(), vec!["question_en", "question_te"]);
        assert!(!mapping.is_empty());
    }

    #[test]
    fn empty_single_candidate() {
        assert!(FieldMapping::none().is_empty());
        assert!(!FieldMapping::single("answer").is_empty());
    }
}
