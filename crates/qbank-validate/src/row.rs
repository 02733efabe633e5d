//! Single-row normalization and validation.

use std::collections::HashMap;

use qbank_common::normalize_header;
use qbank_model::{
    CellValue, ExamId, FieldMapping, HeaderMapping, LogicalField, NormalizedQuestion, RawRecord,
    RawRow, compose_validation_log,
};
use tracing::{debug, warn};

use crate::answer::resolve_answer;
use crate::error::RowError;
use crate::rules::diagnose;

/// Separator placed between per-language values of a merged field.
pub const LANGUAGE_SEPARATOR: &str = "<br/>";

/// Record cells keyed by normalized header. Later duplicates win.
struct NormalizedRecord<'a> {
    cells: HashMap<String, &'a CellValue>,
}

impl<'a> NormalizedRecord<'a> {
    fn new(record: &'a RawRecord) -> Self {
        let mut cells = HashMap::with_capacity(record.len());
        for (header, value) in record.iter() {
            cells.insert(normalize_header(Some(header)), value);
        }
        Self { cells }
    }

    /// Trimmed, non-blank text of one column.
    fn text(&self, header: &str, field: LogicalField) -> Result<Option<String>, RowError> {
        let Some(value) = self.cells.get(header) else {
            return Ok(None);
        };
        if value.is_composite() {
            return Err(RowError::CompositeValue {
                header: header.to_string(),
                field,
            });
        }
        Ok(value
            .to_text()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }

    fn field(&self, mapping: &FieldMapping, field: LogicalField) -> Result<String, RowError> {
        match mapping {
            FieldMapping::Bilingual { per_language, .. } => {
                let mut parts = Vec::with_capacity(per_language.len());
                for header in per_language.values() {
                    if let Some(text) = self.text(header, field)? {
                        parts.push(text);
                    }
                }
                Ok(parts.join(LANGUAGE_SEPARATOR))
            }
            FieldMapping::SingleCandidate { candidates } => {
                for header in candidates {
                    if let Some(text) = self.text(header, field)? {
                        return Ok(text);
                    }
                }
                Ok(String::new())
            }
        }
    }
}

/// Normalizes and validates one row, reporting unexpected structure as an error.
///
/// Absent or non-record rows, and records without any keys, are not errors:
/// they produce the `Malformed Row` shape directly.
pub fn try_process_row(
    row: &RawRow,
    row_index: usize,
    exam_id: &ExamId,
    mapping: &HeaderMapping,
) -> Result<NormalizedQuestion, RowError> {
    let record = match row {
        RawRow::Malformed { reason } => {
            debug!(row = row_index + 2, %reason, "malformed row");
            return Ok(NormalizedQuestion::malformed(
                row_index,
                exam_id.clone(),
                reason,
            ));
        }
        RawRow::Record(record) if record.is_empty() => {
            debug!(row = row_index + 2, "empty record");
            return Ok(NormalizedQuestion::malformed(
                row_index,
                exam_id.clone(),
                "empty record",
            ));
        }
        RawRow::Record(record) => record,
    };

    let cells = NormalizedRecord::new(record);
    let question = cells.field(&mapping.question, LogicalField::Question)?;
    let option_a = cells.field(&mapping.option_a, LogicalField::OptionA)?;
    let option_b = cells.field(&mapping.option_b, LogicalField::OptionB)?;
    let option_c = cells.field(&mapping.option_c, LogicalField::OptionC)?;
    let option_d = cells.field(&mapping.option_d, LogicalField::OptionD)?;
    let answer_raw = cells.field(&mapping.answer, LogicalField::Answer)?;

    let options = [
        option_a.as_str(),
        option_b.as_str(),
        option_c.as_str(),
        option_d.as_str(),
    ];
    let answer = resolve_answer(&answer_raw, &options);
    let errors = diagnose(&question, &options, &answer);
    let validation_log = compose_validation_log(row_index, &errors);
    debug!(row = row_index + 2, log = %validation_log, "processed row");

    Ok(NormalizedQuestion {
        row_index,
        exam_id: exam_id.clone(),
        correct_option: answer.letter_str().to_string(),
        correct_index: answer.index,
        errors,
        validation_log,
        question,
        option_a,
        option_b,
        option_c,
        option_d,
    })
}

/// Normalizes and validates one row. Never fails.
///
/// A [`RowError`] becomes a `Malformed Row` entry whose log carries the
/// error message.
pub fn process_row(
    row: &RawRow,
    row_index: usize,
    exam_id: &ExamId,
    mapping: &HeaderMapping,
) -> NormalizedQuestion {
    match try_process_row(row, row_index, exam_id, mapping) {
        Ok(question) => question,
        Err(error) => {
            warn!(row = row_index + 2, %error, "row could not be processed");
            NormalizedQuestion::malformed(row_index, exam_id.clone(), &error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use qbank_model::{ErrorTag, OptionLetter};

    use super::*;

    fn exam() -> ExamId {
        ExamId::new("test-exam-uuid").unwrap()
    }

    fn simple_mapping() -> HeaderMapping {
        HeaderMapping {
            question: FieldMapping::single("question"),
            option_a: FieldMapping::single("option_a"),
            option_b: FieldMapping::single("option_b"),
            option_c: FieldMapping::single("option_c"),
            option_d: FieldMapping::single("option_d"),
            answer: FieldMapping::single("correct_answer"),
        }
    }

    fn record(answer: &str) -> RawRow {
        RawRecord::new()
            .with("Question", "2+2?")
            .with("Option_A", "3")
            .with("Option_B", "4")
            .with("Option_C", "5")
            .with("Option_D", "6")
            .with("Correct_Answer", answer)
            .into()
    }

    #[test]
    fn valid_row() {
        let row = process_row(&record("b"), 0, &exam(), &simple_mapping());
        assert!(row.is_acceptable());
        assert_eq!(row.correct_option, "B");
        assert_eq!(row.correct_index, 1);
        assert_eq!(row.validation_log, "Row 2: Valid");
        assert_eq!(row.correct_letter(), Some(OptionLetter::B));
    }

    #[test]
    fn answer_by_option_text() {
        let row = process_row(&record(" 6 "), 0, &exam(), &simple_mapping());
        // "6" is not in 1..=4, so it falls through to option text.
        assert_eq!(row.correct_option, "D");
    }

    #[test]
    fn later_duplicate_key_wins() {
        let row: RawRow = RawRecord::new()
            .with("question", "first")
            .with(" QUESTION ", "second")
            .into();
        let out = process_row(&row, 0, &exam(), &simple_mapping());
        assert_eq!(out.question, "second");
    }

    #[test]
    fn numbers_render_without_fraction() {
        let row: RawRow = RawRecord::new()
            .with("Question", "Pick two")
            .with("Option_A", 1.0)
            .with("Option_B", 2.0)
            .with("Option_C", 2.5)
            .with("Option_D", 4.0)
            .with("Correct_Answer", 2.0)
            .into();
        let out = process_row(&row, 0, &exam(), &simple_mapping());
        assert_eq!(out.option_a, "1");
        assert_eq!(out.option_c, "2.5");
        assert_eq!(out.correct_option, "B");
    }

    #[test]
    fn missing_answer_column() {
        let mut mapping = simple_mapping();
        mapping.answer = FieldMapping::none();
        let out = process_row(&record("b"), 4, &exam(), &mapping);
        assert_eq!(out.errors, vec![ErrorTag::InvalidAnswer]);
        assert_eq!(out.validation_log, "Row 6: Invalid Answer");
        assert_eq!(out.correct_index, -1);
    }

    #[test]
    fn empty_record_is_malformed() {
        let out = process_row(&RawRow::from(RawRecord::new()), 0, &exam(), &simple_mapping());
        assert_eq!(out.errors, vec![ErrorTag::MalformedRow]);
        assert_eq!(out.validation_log, "Row 2: Malformed Row - empty record");
    }

    #[test]
    fn composite_value_is_reported() {
        let row: RawRow = RawRecord::new()
            .with("question", CellValue::Composite("[\"a\",\"b\"]".to_string()))
            .into();
        let err = try_process_row(&row, 0, &exam(), &simple_mapping()).unwrap_err();
        assert_eq!(
            err,
            RowError::CompositeValue {
                header: "question".to_string(),
                field: LogicalField::Question
            }
        );
        let out = process_row(&row, 0, &exam(), &simple_mapping());
        assert_eq!(out.errors, vec![ErrorTag::MalformedRow]);
        assert!(out.validation_log.starts_with("Row 2: Malformed Row - column 'question'"));
    }

    #[test]
    fn unmapped_composite_is_ignored() {
        let row: RawRow = RawRecord::new()
            .with("Question", "2+2?")
            .with("Option_A", "3")
            .with("Option_B", "4")
            .with("Option_C", "5")
            .with("Option_D", "6")
            .with("Correct_Answer", "B")
            .with("tags", CellValue::Composite("[]".to_string()))
            .into();
        assert!(process_row(&row, 0, &exam(), &simple_mapping()).is_acceptable());
    }
}
