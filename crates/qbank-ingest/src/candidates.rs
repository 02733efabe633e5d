//! Candidate question records supplied as JSON.

use qbank_model::{CellValue, RawRecord, RawRow};
use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Parses a JSON array of candidate question objects.
///
/// Each object becomes a record; any other element becomes a malformed row
/// so that it still occupies its position in the batch.
pub fn read_candidates_json(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|source| IngestError::JsonParse { source })?;
    candidates_from_value(&value)
}

/// Converts an already-parsed JSON array into raw rows.
pub fn candidates_from_value(value: &Value) -> Result<Vec<RawRow>> {
    let Value::Array(items) = value else {
        return Err(IngestError::JsonShape {
            found: json_kind(value),
        });
    };
    let rows: Vec<RawRow> = items.iter().map(candidate_row).collect();
    debug!(rows = rows.len(), "parsed candidate records");
    Ok(rows)
}

fn candidate_row(item: &Value) -> RawRow {
    match item {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.as_str(), json_cell(value)))
            .collect::<RawRecord>()
            .into(),
        other => RawRow::malformed(format!("expected an object, found {}", json_kind(other))),
    }
}

/// Converts one JSON value into a [`CellValue`]. Nested values keep their
/// JSON text as [`CellValue::Composite`].
pub fn json_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(flag) => CellValue::Bool(*flag),
        Value::Number(number) => number
            .as_f64()
            .map_or_else(|| CellValue::Text(number.to_string()), CellValue::Number),
        Value::String(text) => CellValue::Text(text.clone()),
        Value::Array(_) | Value::Object(_) => CellValue::Composite(value.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
