//! Error types for row processing and imports.

use qbank_model::LogicalField;
use thiserror::Error;

/// Unexpected record structure found while processing a single row.
///
/// These never escape the batch: the row processor turns them into a
/// `Malformed Row` entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// A mapped column held a nested list or object instead of a scalar.
    #[error("column '{header}' for {field} holds a nested value")]
    CompositeValue { header: String, field: LogicalField },
}

/// Batch-fatal import failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The header set lacks one or more mandatory fields.
    #[error("header set rejected, missing: {}", labels(.missing))]
    HeaderRejected {
        missing: Vec<LogicalField>,
        warnings: Vec<String>,
    },

    /// A preview position outside the current rows.
    #[error("no preview row at position {position} (rows: {len})")]
    PositionOutOfRange { position: usize, len: usize },
}

fn labels(fields: &[LogicalField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
