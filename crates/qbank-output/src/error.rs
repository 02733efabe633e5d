//! Question store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while handing records to a question store.
///
/// A commit either succeeds as a whole or fails with one of these; there is
/// no per-row retry.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No acceptable rows were left to commit.
    #[error("no valid questions to import")]
    NothingToCommit,

    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Existing store content could not be read back.
    #[error("store file {path} is not a JSON array of questions")]
    InvalidStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be serialized.
    #[error("failed to serialize questions")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// The temp file could not be renamed over the target.
    #[error("failed to complete write to {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing store refused the batch.
    #[error("question store rejected the batch: {0}")]
    Rejected(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
