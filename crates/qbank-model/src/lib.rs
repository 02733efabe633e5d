//! Data model for exam question imports.
//!
//! The types here describe every stage of an import: raw records as produced
//! by a tabular parser or a document extraction step, the header mapping
//! resolved once per batch, and the normalized questions that are previewed,
//! edited and finally handed to persistence.

pub mod cell;
pub mod error;
pub mod field;
pub mod ids;
pub mod mapping;
pub mod question;

pub use cell::{CellValue, RawRecord, RawRow, TabularInput};
pub use error::{ModelError, Result};
pub use field::{Language, LogicalField, OptionLetter};
pub use ids::ExamId;
pub use mapping::{FieldMapping, HeaderMapping};
pub use question::{
    ErrorTag, ImportSummary, NormalizedQuestion, QuestionRecord, UNRESOLVED_INDEX,
    compose_validation_log,
};
