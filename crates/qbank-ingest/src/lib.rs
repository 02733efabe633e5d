//! Question source ingestion.
//!
//! Reads delimited text, workbook sheets, candidate JSON and plain text into
//! the raw rows consumed by the import pipeline. Tabular sources keep their
//! header row for resolution; the others produce records with fixed keys.

pub mod candidates;
pub mod delimited;
pub mod error;
pub mod extract;
pub mod files;
pub mod source;
pub mod workbook;

pub use candidates::{candidates_from_value, json_cell, read_candidates_json};
pub use delimited::{read_csv_bytes, read_csv_file};
pub use error::{IngestError, Result};
pub use extract::{LineScanExtractor, QuestionExtractor};
pub use files::{
    MAX_FILE_SIZE, check_file_size, check_file_size_with_limit, decode_utf8, read_text_file,
    validate_encoding,
};
pub use source::{IngestOptions, SourceData, SourceKind, load_source};
pub use workbook::{cell_value, read_workbook};
