//! Header resolution for question bank imports.
//!
//! A header set is resolved once per batch into a [`HeaderMapping`] that
//! tells the row processor where each logical field comes from. Columns
//! named `<base>_<lang>` are grouped per base and merged across languages;
//! everything else is matched against each field's alias list.

pub mod columns;
pub mod error;
pub mod resolver;

pub use columns::{HeaderGroups, group_headers, parse_language_column};
pub use error::{MappingError, Result};
pub use resolver::{HeaderResolution, resolve_headers, resolve_headers_strict};

pub use qbank_model::{FieldMapping, HeaderMapping};
