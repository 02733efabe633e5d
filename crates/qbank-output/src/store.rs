//! Question stores and the commit step.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use qbank_model::{NormalizedQuestion, QuestionRecord};
use qbank_validate::PreviewSession;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::sanitize::sanitize_for_db;

/// A sink that accepts a batch of sanitized questions in one call.
pub trait QuestionStore {
    /// Inserts every record or none. Returns the number inserted.
    fn insert_batch(&mut self, records: &[QuestionRecord]) -> Result<usize>;
}

/// In-memory store, used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<QuestionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }
}

impl QuestionStore for MemoryStore {
    fn insert_batch(&mut self, records: &[QuestionRecord]) -> Result<usize> {
        self.records.extend_from_slice(records);
        Ok(records.len())
    }
}

/// Store backed by a JSON array on disk.
///
/// Each batch is appended to the records already in the file. Writes go to a
/// temp file that is renamed over the target, so the file is never left
/// half-written.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the records currently in the file. A missing file is empty.
    pub fn load(&self) -> Result<Vec<QuestionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path).map_err(|source| StoreError::Io {
            operation: "read",
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::InvalidStore {
            path: self.path.clone(),
            source,
        })
    }

    fn write_atomic(&self, records: &[QuestionRecord]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|source| StoreError::Serialization { source })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let written = write_synced(&temp_path, &bytes).and_then(|()| {
            fs::rename(&temp_path, &self.path).map_err(|source| StoreError::AtomicWriteFailed {
                temp_path: temp_path.clone(),
                target_path: self.path.clone(),
                source,
            })
        });
        if written.is_err() && fs::remove_file(&temp_path).is_ok() {
            warn!(path = %temp_path.display(), "removed partial store file");
        }
        written
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_error = |operation: &'static str| {
        move |source: std::io::Error| StoreError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    };
    let mut file = File::create(path).map_err(io_error("create"))?;
    file.write_all(bytes).map_err(io_error("write"))?;
    file.sync_all().map_err(io_error("sync"))
}

impl QuestionStore for JsonFileStore {
    fn insert_batch(&mut self, records: &[QuestionRecord]) -> Result<usize> {
        let mut all = self.load()?;
        all.extend_from_slice(records);
        self.write_atomic(&all)?;
        info!(
            path = %self.path.display(),
            inserted = records.len(),
            total = all.len(),
            "questions written"
        );
        Ok(records.len())
    }
}

/// Counts reported after a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    pub inserted: usize,
    /// Rows left out because they still carried errors.
    pub skipped: usize,
}

/// Sanitizes the acceptable rows of a preview and inserts them in one batch.
///
/// # Errors
///
/// Returns [`StoreError::NothingToCommit`] when no row is acceptable, or the
/// store's own error when the insert fails.
pub fn commit(session: &PreviewSession, store: &mut dyn QuestionStore) -> Result<CommitReport> {
    let records = sanitize_for_db(session.acceptable());
    let skipped = session.len() - records.len();
    if skipped > 0 {
        let rows: Vec<usize> = session
            .rejected()
            .map(NormalizedQuestion::display_row)
            .collect();
        warn!(skipped, ?rows, "skipping invalid rows");
    }
    if records.is_empty() {
        return Err(StoreError::NothingToCommit);
    }

    let inserted = store.insert_batch(&records)?;
    info!(inserted, skipped, "commit complete");
    Ok(CommitReport { inserted, skipped })
}
