use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, trace, warn};

use qbank_ingest::{IngestOptions, SourceData, SourceKind, load_source};
use qbank_map::resolve_headers;
use qbank_model::ExamId;
use qbank_output::{JsonFileStore, MemoryStore, QuestionStore, commit};
use qbank_validate::{BatchOutcome, import_extracted, import_tabular};

use crate::logging::redact_value;
use crate::types::{HeadersResult, ImportRequest, ImportResult};

/// Reads a tabular source and resolves its header row.
pub fn run_headers(file: &Path, sheet: Option<&str>) -> Result<HeadersResult> {
    let options = IngestOptions {
        sheet: sheet.map(str::to_string),
        ..IngestOptions::default()
    };
    let data = load_source(file, &options)
        .with_context(|| format!("read question source {}", file.display()))?;
    let SourceData::Tabular(input) = data else {
        bail!("{} has no header row", file.display());
    };
    let resolution = resolve_headers(&input.headers);
    Ok(HeadersResult {
        file: file.to_path_buf(),
        headers: input.headers,
        resolution,
    })
}

/// Runs the whole import: intake, validation, preview and commit.
///
/// Intake and header failures are returned as errors. A failed commit is
/// recorded on the result so the row summary can still be shown.
pub fn run_import(request: &ImportRequest) -> Result<ImportResult> {
    let exam_id = ExamId::new(request.exam_id.as_str()).context("parse exam id")?;
    let span = info_span!("run_import", exam_id = %exam_id);
    let _guard = span.enter();

    let file = &request.file;
    let kind = SourceKind::from_path(file)?;
    let options = IngestOptions {
        sheet: request.sheet.clone(),
        ..IngestOptions::default()
    };
    let data = load_source(file, &options)
        .with_context(|| format!("read question source {}", file.display()))?;
    if data.row_count() == 0 {
        bail!("no questions found in {}", file.display());
    }

    let mut outcome = process_source(&data, &exam_id)?;
    let warnings = std::mem::take(&mut outcome.warnings);
    for warning in &warnings {
        info!(%warning, "header note");
    }
    for row in &outcome.rows {
        debug!(row = row.display_row(), status = %row.validation_log, "row validated");
        trace!(
            row = row.display_row(),
            question = redact_value(&row.question),
            "row text"
        );
    }

    let session = outcome.into_preview();
    let rows = session.rows().to_vec();
    let summary = session.summary();

    let output = if request.dry_run {
        None
    } else {
        Some(
            request
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(file)),
        )
    };
    let mut store: Box<dyn QuestionStore> = match &output {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    let (commit_report, commit_error) = match commit(&session, store.as_mut()) {
        Ok(report) => (Some(report), None),
        Err(error) => {
            warn!(%error, "commit failed");
            (None, Some(error.to_string()))
        }
    };

    Ok(ImportResult {
        file: file.clone(),
        kind,
        exam_id: exam_id.as_str().to_string(),
        rows,
        summary,
        warnings,
        output,
        commit: commit_report,
        commit_error,
    })
}

fn process_source(data: &SourceData, exam_id: &ExamId) -> Result<BatchOutcome> {
    match data {
        SourceData::Tabular(input) => {
            import_tabular(&input.headers, &input.rows, exam_id).context("resolve header row")
        }
        SourceData::Extracted(candidates) => Ok(import_extracted(candidates, exam_id)),
    }
}

/// Store path used when `--output` is absent: `<stem>.questions.json` next
/// to the source file.
pub fn default_output_path(file: &Path) -> PathBuf {
    file.with_extension("questions.json")
}
