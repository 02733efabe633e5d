//! Logical question fields, answer letters and supported languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Language codes recognised in `<base>_<code>` column headers.
///
/// Declaration order is the merge priority order: English first, then the
/// remaining codes as listed. `Ord` follows that order, so a
/// `BTreeMap<Language, _>` iterates in merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Te,
    Hi,
    Ta,
    Ml,
    Kn,
    Gu,
    Mr,
    Bn,
    Pa,
    Ur,
    As,
    Ks,
}

impl Language {
    /// All languages in merge priority order.
    pub const ALL: [Language; 13] = [
        Self::En,
        Self::Te,
        Self::Hi,
        Self::Ta,
        Self::Ml,
        Self::Kn,
        Self::Gu,
        Self::Mr,
        Self::Bn,
        Self::Pa,
        Self::Ur,
        Self::As,
        Self::Ks,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Te => "te",
            Self::Hi => "hi",
            Self::Ta => "ta",
            Self::Ml => "ml",
            Self::Kn => "kn",
            Self::Gu => "gu",
            Self::Mr => "mr",
            Self::Bn => "bn",
            Self::Pa => "pa",
            Self::Ur => "ur",
            Self::As => "as",
            Self::Ks => "ks",
        }
    }

    /// Looks up a language by its two-letter code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ModelError::UnknownLanguage(s.to_string()))
    }
}

/// Canonical answer letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Zero-based option position.
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses a letter, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "C" | "c" => Some(Self::C),
            "D" | "d" => Some(Self::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const QUESTION_ALIASES: &[&str] = &["question", "question_text", "q", "question_title"];
const OPTION_A_ALIASES: &[&str] = &[
    "option_a", "option a", "a", "opt_a", "opt a", "option1", "option_1", "answer_a",
];
const OPTION_B_ALIASES: &[&str] = &[
    "option_b", "option b", "b", "opt_b", "opt b", "option2", "option_2", "answer_b",
];
const OPTION_C_ALIASES: &[&str] = &[
    "option_c", "option c", "c", "opt_c", "opt c", "option3", "option_3", "answer_c",
];
const OPTION_D_ALIASES: &[&str] = &[
    "option_d", "option d", "d", "opt_d", "opt d", "option4", "option_4", "answer_d",
];
const ANSWER_ALIASES: &[&str] = &[
    "correct_answer",
    "correct answer",
    "correct",
    "answer",
    "correct_option",
    "correctoption",
    "ans",
    "right_answer",
];

/// The six logical fields of an imported question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    Question,
    OptionA,
    OptionB,
    OptionC,
    OptionD,
    Answer,
}

impl LogicalField {
    pub const ALL: [LogicalField; 6] = [
        Self::Question,
        Self::OptionA,
        Self::OptionB,
        Self::OptionC,
        Self::OptionD,
        Self::Answer,
    ];

    /// The four option fields in letter order.
    pub const OPTIONS: [LogicalField; 4] =
        [Self::OptionA, Self::OptionB, Self::OptionC, Self::OptionD];

    /// Output key, as used in persisted records.
    pub fn key(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::OptionA => "option_a",
            Self::OptionB => "option_b",
            Self::OptionC => "option_c",
            Self::OptionD => "option_d",
            Self::Answer => "correct_option",
        }
    }

    /// Human-readable label for diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::Question => "Question",
            Self::OptionA => "Option A",
            Self::OptionB => "Option B",
            Self::OptionC => "Option C",
            Self::OptionD => "Option D",
            Self::Answer => "Answer",
        }
    }

    /// Base name expected for `<base>_<lang>` columns. Answers are never bilingual.
    pub fn bilingual_base(self) -> Option<&'static str> {
        match self {
            Self::Question => Some("question"),
            Self::OptionA => Some("optiona"),
            Self::OptionB => Some("optionb"),
            Self::OptionC => Some("optionc"),
            Self::OptionD => Some("optiond"),
            Self::Answer => None,
        }
    }

    /// Accepted single-column header names, highest priority first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Question => QUESTION_ALIASES,
            Self::OptionA => OPTION_A_ALIASES,
            Self::OptionB => OPTION_B_ALIASES,
            Self::OptionC => OPTION_C_ALIASES,
            Self::OptionD => OPTION_D_ALIASES,
            Self::Answer => ANSWER_ALIASES,
        }
    }

    /// Mandatory fields must be present in the header set or the batch is rejected.
    pub fn is_mandatory(self) -> bool {
        !matches!(self, Self::Answer)
    }

    /// Looks a field up by its output key (`question`, `option_a`, ..., `correct_option`).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
