//! Row normalization and validation for question imports.
//!
//! The pipeline runs in three steps: [`process_row`] turns one raw record
//! into a [`NormalizedQuestion`](qbank_model::NormalizedQuestion) tagged
//! with any validity errors, [`process_batch`] runs it over a whole import
//! with per-row failure isolation, and [`PreviewSession`] lets the user fix
//! or drop rows before the acceptable ones are committed.

pub mod answer;
pub mod batch;
pub mod error;
pub mod preview;
pub mod row;
pub mod rules;

pub use answer::{ResolvedAnswer, resolve_answer, resolve_letter};
pub use batch::{BatchOutcome, import_extracted, import_tabular, process_batch};
pub use error::{ImportError, Result, RowError};
pub use preview::{PreviewSession, revalidate_row};
pub use row::{LANGUAGE_SEPARATOR, process_row, try_process_row};
pub use rules::diagnose;
