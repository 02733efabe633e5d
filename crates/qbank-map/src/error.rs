//! Error types for header resolution.

use qbank_model::LogicalField;
use thiserror::Error;

/// Errors from header resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// One or more mandatory fields have no usable column.
    #[error("missing required columns: {}", labels(.missing))]
    MissingFields { missing: Vec<LogicalField> },
}

fn labels(fields: &[LogicalField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
