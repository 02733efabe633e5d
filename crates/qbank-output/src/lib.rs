//! Persistence handoff for question bank imports.
//!
//! Rows leave the pipeline through [`sanitize_for_db`], which reduces them to
//! the seven persisted string columns, and are written by a
//! [`QuestionStore`] in a single [`commit`].

pub mod error;
pub mod sanitize;
pub mod store;

pub use error::{Result, StoreError};
pub use sanitize::{sanitize_for_db, sanitize_json, sanitize_row, sanitize_value};
pub use store::{CommitReport, JsonFileStore, MemoryStore, QuestionStore, commit};
