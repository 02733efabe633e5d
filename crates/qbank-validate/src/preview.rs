//! Editable preview of processed rows.
//!
//! After a batch is processed the user may correct individual fields or drop
//! rows before committing. Each edit re-validates only the edited row.

use qbank_model::{ImportSummary, LogicalField, NormalizedQuestion};
use serde::Serialize;
use tracing::debug;

use crate::answer::resolve_letter;
use crate::error::{ImportError, Result};
use crate::rules::diagnose;

/// Applies one field edit to a row and re-validates it.
///
/// The value is trimmed before it is stored, as at batch time, so a
/// whitespace-only edit leaves the field `""`.
///
/// An answer edit must be a letter A-D (case and surrounding whitespace are
/// ignored); a valid letter is stored in canonical form and re-derives
/// `correct_index`. Any other edit re-checks the stored `correct_option`
/// the same way. An unresolvable answer leaves `correct_index` at `-1`.
pub fn revalidate_row(row: &mut NormalizedQuestion, field: LogicalField, value: &str) {
    row.set_field(field, value.trim());

    let answer = resolve_letter(&row.correct_option);
    if let Some(letter) = answer.letter {
        row.correct_option = letter.as_str().to_string();
    }
    row.correct_index = answer.index;

    row.errors = diagnose(&row.question, &row.options(), &answer);
    row.refresh_validation_log();
    debug!(row = row.display_row(), field = field.key(), log = %row.validation_log, "row edited");
}

/// The rows of one import, open for editing until commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreviewSession {
    rows: Vec<NormalizedQuestion>,
}

impl PreviewSession {
    pub fn new(rows: Vec<NormalizedQuestion>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[NormalizedQuestion] {
        &self.rows
    }

    pub fn get(&self, position: usize) -> Option<&NormalizedQuestion> {
        self.rows.get(position)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Edits one field of the row at `position` and re-validates that row.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::PositionOutOfRange`] when no row is at `position`.
    pub fn edit(
        &mut self,
        position: usize,
        field: LogicalField,
        value: &str,
    ) -> Result<&NormalizedQuestion> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(position)
            .ok_or(ImportError::PositionOutOfRange { position, len })?;
        revalidate_row(row, field, value);
        Ok(row)
    }

    /// Removes the row at `position`. Remaining rows keep their `row_index`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::PositionOutOfRange`] when no row is at `position`.
    pub fn remove(&mut self, position: usize) -> Result<NormalizedQuestion> {
        if position >= self.rows.len() {
            return Err(ImportError::PositionOutOfRange {
                position,
                len: self.rows.len(),
            });
        }
        let removed = self.rows.remove(position);
        debug!(row = removed.display_row(), "row removed from preview");
        Ok(removed)
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary::from_rows(&self.rows)
    }

    pub fn acceptable(&self) -> impl Iterator<Item = &NormalizedQuestion> {
        self.rows.iter().filter(|row| row.is_acceptable())
    }

    pub fn rejected(&self) -> impl Iterator<Item = &NormalizedQuestion> {
        self.rows.iter().filter(|row| !row.is_acceptable())
    }

    /// Consumes the session, keeping only acceptable rows.
    pub fn into_acceptable(self) -> Vec<NormalizedQuestion> {
        self.rows
            .into_iter()
            .filter(NormalizedQuestion::is_acceptable)
            .collect()
    }
}
