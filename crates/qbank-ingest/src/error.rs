//! Error types for question source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a question source.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File extension is not a supported source kind.
    #[error("unsupported file type '{extension}': {path} (use .csv, .xlsx, .xls, .json or .txt)")]
    UnsupportedFile { path: PathBuf, extension: String },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path} (save the file as UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Errors ===
    /// Failed to parse delimited text.
    #[error("failed to parse CSV: {source}")]
    CsvParse {
        #[source]
        source: csv::Error,
    },

    /// Delimited text has no header row.
    #[error("CSV input is empty")]
    EmptyCsv,

    // === Workbook Errors ===
    /// Workbook could not be opened or read.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Requested sheet does not exist.
    #[error("sheet '{sheet}' not found in {path} (available: {})", .available.join(", "))]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    /// Sheet has no header row.
    #[error("sheet '{sheet}' in {path} is empty")]
    EmptySheet { path: PathBuf, sheet: String },

    // === Candidate JSON Errors ===
    /// Input is not valid JSON.
    #[error("invalid JSON: {source}")]
    JsonParse {
        #[source]
        source: serde_json::Error,
    },

    /// JSON is valid but not a list of candidate records.
    #[error("expected a JSON array of questions, found {found}")]
    JsonShape { found: &'static str },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/questions.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/questions.csv");
    }

    #[test]
    fn test_sheet_not_found_lists_sheets() {
        let err = IngestError::SheetNotFound {
            path: PathBuf::from("bank.xlsx"),
            sheet: "Maths".to_string(),
            available: vec!["Sheet1".to_string(), "Physics".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "sheet 'Maths' not found in bank.xlsx (available: Sheet1, Physics)"
        );
    }
}
