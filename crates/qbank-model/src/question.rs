//! Normalized questions, validation tags and persistence records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{LogicalField, OptionLetter};
use crate::ids::ExamId;

/// `correct_index` value for an unresolved answer.
pub const UNRESOLVED_INDEX: i32 = -1;

/// Validity violations a row can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorTag {
    #[serde(rename = "Missing Question")]
    MissingQuestion,
    #[serde(rename = "Missing Options")]
    MissingOptions,
    #[serde(rename = "Invalid Answer")]
    InvalidAnswer,
    #[serde(rename = "Malformed Row")]
    MalformedRow,
}

impl ErrorTag {
    pub fn label(self) -> &'static str {
        match self {
            Self::MissingQuestion => "Missing Question",
            Self::MissingOptions => "Missing Options",
            Self::InvalidAnswer => "Invalid Answer",
            Self::MalformedRow => "Malformed Row",
        }
    }
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Builds the one-line diagnostic for a row.
///
/// Display rows are 1-based and account for the header row, so row index 0
/// is reported as "Row 2".
pub fn compose_validation_log(row_index: usize, errors: &[ErrorTag]) -> String {
    if errors.is_empty() {
        return format!("Row {}: Valid", row_index + 2);
    }
    let tags: Vec<&str> = errors.iter().map(|tag| tag.label()).collect();
    format!("Row {}: {}", row_index + 2, tags.join(", "))
}

/// The canonical output unit of an import.
///
/// Text fields use `""` for missing values. A row is acceptable iff `errors`
/// is empty, which holds exactly when the question and all four options are
/// non-empty and `correct_index` is in `0..=3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedQuestion {
    /// Zero-based position in the source batch. Never renumbered.
    pub row_index: usize,
    pub exam_id: ExamId,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    /// `"A"` to `"D"`, or `""` when unresolved.
    pub correct_option: String,
    /// `0..=3`, or [`UNRESOLVED_INDEX`].
    pub correct_index: i32,
    pub errors: Vec<ErrorTag>,
    pub validation_log: String,
}

impl NormalizedQuestion {
    /// The all-empty shape used for rows that could not be read at all.
    pub fn malformed(row_index: usize, exam_id: ExamId, reason: &str) -> Self {
        let reason = reason.trim();
        let validation_log = if reason.is_empty() {
            compose_validation_log(row_index, &[ErrorTag::MalformedRow])
        } else {
            format!(
                "{} - {reason}",
                compose_validation_log(row_index, &[ErrorTag::MalformedRow])
            )
        };
        Self {
            row_index,
            exam_id,
            question: String::new(),
            option_a: String::new(),
            option_b: String::new(),
            option_c: String::new(),
            option_d: String::new(),
            correct_option: String::new(),
            correct_index: UNRESOLVED_INDEX,
            errors: vec![ErrorTag::MalformedRow],
            validation_log,
        }
    }

    /// Row number as shown to users (header row is row 1).
    pub fn display_row(&self) -> usize {
        self.row_index + 2
    }

    pub fn is_acceptable(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error(&self, tag: ErrorTag) -> bool {
        self.errors.contains(&tag)
    }

    pub fn options(&self) -> [&str; 4] {
        [
            self.option_a.as_str(),
            self.option_b.as_str(),
            self.option_c.as_str(),
            self.option_d.as_str(),
        ]
    }

    /// The resolved answer letter, if the stored index is in range.
    pub fn correct_letter(&self) -> Option<OptionLetter> {
        usize::try_from(self.correct_index)
            .ok()
            .and_then(OptionLetter::from_index)
    }

    pub fn field(&self, field: LogicalField) -> &str {
        match field {
            LogicalField::Question => &self.question,
            LogicalField::OptionA => &self.option_a,
            LogicalField::OptionB => &self.option_b,
            LogicalField::OptionC => &self.option_c,
            LogicalField::OptionD => &self.option_d,
            LogicalField::Answer => &self.correct_option,
        }
    }

    /// Overwrites one field. Validation state is left untouched.
    pub fn set_field(&mut self, field: LogicalField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LogicalField::Question => self.question = value,
            LogicalField::OptionA => self.option_a = value,
            LogicalField::OptionB => self.option_b = value,
            LogicalField::OptionC => self.option_c = value,
            LogicalField::OptionD => self.option_d = value,
            LogicalField::Answer => self.correct_option = value,
        }
    }

    /// Recomputes `validation_log` from the current errors.
    pub fn refresh_validation_log(&mut self) {
        self.validation_log = compose_validation_log(self.row_index, &self.errors);
    }
}

/// Counts over one processed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub validation_logs: Vec<String>,
}

impl ImportSummary {
    pub fn from_rows(rows: &[NormalizedQuestion]) -> Self {
        let valid_count = rows.iter().filter(|row| row.is_acceptable()).count();
        Self {
            total_rows: rows.len(),
            valid_count,
            invalid_count: rows.len() - valid_count,
            validation_logs: rows.iter().map(|row| row.validation_log.clone()).collect(),
        }
    }

    pub fn has_invalid(&self) -> bool {
        self.invalid_count > 0
    }
}

/// Flat record handed to the question store.
///
/// Keys are exactly the persisted columns, all string-valued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub exam_id: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: String,
}

impl QuestionRecord {
    /// Persisted column names in output order.
    pub const KEYS: [&'static str; 7] = [
        "exam_id",
        "question",
        "option_a",
        "option_b",
        "option_c",
        "option_d",
        "correct_option",
    ];
}
