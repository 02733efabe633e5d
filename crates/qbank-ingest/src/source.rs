//! Source kind detection and dispatch.

use std::path::Path;

use qbank_model::{RawRow, TabularInput};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::candidates::read_candidates_json;
use crate::delimited::read_csv_file;
use crate::error::{IngestError, Result};
use crate::extract::{LineScanExtractor, QuestionExtractor};
use crate::files::{MAX_FILE_SIZE, check_file_size_with_limit, read_bytes, read_text_file};
use crate::workbook::read_workbook;

/// The kinds of question source the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Delimited text with a header row.
    Csv,
    /// Spreadsheet workbook; one sheet is read.
    Workbook,
    /// JSON array of pre-shaped candidate records.
    Candidates,
    /// Plain text scanned for numbered questions.
    Text,
}

impl SourceKind {
    /// Detects the source kind from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xls" => Ok(Self::Workbook),
            "json" => Ok(Self::Candidates),
            "txt" => Ok(Self::Text),
            _ => Err(IngestError::UnsupportedFile {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    /// Whether this source has a header row that must be resolved.
    pub fn is_tabular(self) -> bool {
        matches!(self, Self::Csv | Self::Workbook)
    }
}

/// Intake settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
    /// Workbook sheet to read; the first sheet when unset.
    pub sheet: Option<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            sheet: None,
        }
    }
}

/// Rows read from a source, shaped by how they must be processed.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    /// Header row plus records; headers go through resolution.
    Tabular(TabularInput),
    /// Candidate records with fixed keys.
    Extracted(Vec<RawRow>),
}

impl SourceData {
    pub fn row_count(&self) -> usize {
        match self {
            Self::Tabular(input) => input.row_count(),
            Self::Extracted(rows) => rows.len(),
        }
    }
}

/// Reads any supported source file.
pub fn load_source(path: &Path, options: &IngestOptions) -> Result<SourceData> {
    let kind = SourceKind::from_path(path)?;
    check_file_size_with_limit(path, options.max_file_size)?;

    let data = match kind {
        SourceKind::Csv => SourceData::Tabular(read_csv_file(path)?),
        SourceKind::Workbook => {
            SourceData::Tabular(read_workbook(path, options.sheet.as_deref())?)
        }
        SourceKind::Candidates => SourceData::Extracted(read_candidates_json(&read_bytes(path)?)?),
        SourceKind::Text => {
            let text = read_text_file(path)?;
            SourceData::Extracted(LineScanExtractor::new().extract(&text)?)
        }
    };

    info!(
        path = %path.display(),
        kind = ?kind,
        rows = data.row_count(),
        "loaded question source"
    );
    Ok(data)
}
