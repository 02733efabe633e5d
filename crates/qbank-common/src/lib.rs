//! Shared utilities for the question bank crates.
//!
//! This crate holds the leaf helpers every other crate leans on: header and
//! cell text normalization, byte-order-mark handling, and numeric formatting
//! for spreadsheet values.

pub mod numeric;
pub mod text;

// Re-export commonly used functions at crate root for convenience
pub use numeric::{format_numeric, parse_i64};
pub use text::{BOM, clean_cell, normalize_header, strip_bom, strip_bom_bytes};
