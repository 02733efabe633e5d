use std::path::PathBuf;

use qbank_ingest::SourceKind;
use qbank_map::HeaderResolution;
use qbank_model::{ImportSummary, NormalizedQuestion};
use qbank_output::CommitReport;

/// Settings for one `import` run.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub file: PathBuf,
    pub exam_id: String,
    /// Question store path; derived from `file` when unset.
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub sheet: Option<String>,
}

#[derive(Debug)]
pub struct ImportResult {
    pub file: PathBuf,
    pub kind: SourceKind,
    pub exam_id: String,
    pub rows: Vec<NormalizedQuestion>,
    pub summary: ImportSummary,
    pub warnings: Vec<String>,
    /// Store that received the rows; `None` for dry runs.
    pub output: Option<PathBuf>,
    pub commit: Option<CommitReport>,
    /// Commit failure, reported after the summary.
    pub commit_error: Option<String>,
}

impl ImportResult {
    pub fn has_errors(&self) -> bool {
        self.commit_error.is_some()
    }
}

#[derive(Debug)]
pub struct HeadersResult {
    pub file: PathBuf,
    pub headers: Vec<String>,
    pub resolution: HeaderResolution,
}
