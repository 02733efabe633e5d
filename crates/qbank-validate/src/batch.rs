//! Batch processing over a whole import.

use std::any::Any;
use std::panic;

use qbank_map::resolve_headers;
use qbank_model::{ExamId, HeaderMapping, ImportSummary, NormalizedQuestion, RawRow};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::error::{ImportError, Result};
use crate::preview::PreviewSession;
use crate::row::process_row;

/// Every processed row of one batch plus its summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// One entry per input row, in input order.
    pub rows: Vec<NormalizedQuestion>,
    pub summary: ImportSummary,
    /// Header resolution notes, empty for extracted imports.
    pub warnings: Vec<String>,
}

impl BatchOutcome {
    pub fn acceptable(&self) -> Vec<&NormalizedQuestion> {
        self.rows.iter().filter(|row| row.is_acceptable()).collect()
    }

    pub fn rejected(&self) -> Vec<&NormalizedQuestion> {
        self.rows.iter().filter(|row| !row.is_acceptable()).collect()
    }

    /// Hands the rows over to an editable preview.
    pub fn into_preview(self) -> PreviewSession {
        PreviewSession::new(self.rows)
    }
}

/// Processes every row against one mapping.
///
/// A row that fails in any way, including a panic inside row processing,
/// becomes a `Malformed Row` entry; the rest of the batch is unaffected.
pub fn process_batch(rows: &[RawRow], exam_id: &ExamId, mapping: &HeaderMapping) -> BatchOutcome {
    let span = info_span!("batch", exam_id = %exam_id, rows = rows.len());
    let _guard = span.enter();

    let processed: Vec<NormalizedQuestion> = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            panic::catch_unwind(|| process_row(row, row_index, exam_id, mapping)).unwrap_or_else(
                |payload| {
                    let message = panic_message(payload.as_ref());
                    warn!(row = row_index + 2, %message, "row processing panicked");
                    NormalizedQuestion::malformed(row_index, exam_id.clone(), &message)
                },
            )
        })
        .collect();

    let summary = ImportSummary::from_rows(&processed);
    info!(
        total = summary.total_rows,
        valid = summary.valid_count,
        invalid = summary.invalid_count,
        "batch processed"
    );

    BatchOutcome {
        rows: processed,
        summary,
        warnings: Vec::new(),
    }
}

/// Resolves the header set, then processes the rows.
///
/// # Errors
///
/// Returns [`ImportError::HeaderRejected`] when a mandatory field has no
/// column. No row is processed in that case.
pub fn import_tabular<S: AsRef<str>>(
    headers: &[S],
    rows: &[RawRow],
    exam_id: &ExamId,
) -> Result<BatchOutcome> {
    let span = info_span!("import", exam_id = %exam_id, source = "tabular");
    let _guard = span.enter();

    let resolution = resolve_headers(headers);
    let Some(mapping) = resolution.mapping.filter(|_| resolution.valid) else {
        return Err(ImportError::HeaderRejected {
            missing: resolution.missing,
            warnings: resolution.warnings,
        });
    };

    let mut outcome = process_batch(rows, exam_id, &mapping);
    outcome.warnings = resolution.warnings;
    Ok(outcome)
}

/// Processes pre-shaped candidate records from a document extraction step.
///
/// Candidate keys are fixed by the producer, so every known alias is tried
/// and the batch is never rejected as a whole.
pub fn import_extracted(candidates: &[RawRow], exam_id: &ExamId) -> BatchOutcome {
    let span = info_span!("import", exam_id = %exam_id, source = "extracted");
    let _guard = span.enter();
    process_batch(candidates, exam_id, &HeaderMapping::canonical())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "row processing panicked".to_string()
    }
}
