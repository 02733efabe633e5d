//! Delimited text reading.

use std::path::Path;

use qbank_common::clean_cell;
use qbank_model::{CellValue, RawRecord, RawRow, TabularInput};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::files::{decode_utf8, read_bytes, validate_encoding};

/// Parses UTF-8 delimited text into a header row and records.
///
/// A leading byte-order mark is removed and every value is trimmed. Lines
/// where every value is blank are skipped. Rows shorter than the header
/// leave the trailing columns [`CellValue::Missing`]; values beyond the
/// header width are dropped.
pub fn read_csv_bytes(bytes: &[u8]) -> Result<TabularInput> {
    let text = decode_utf8(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::CsvParse { source })?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv);
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = result.map_err(|source| IngestError::CsvParse { source })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            skipped += 1;
            continue;
        }
        let cells: RawRecord = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record
                    .get(idx)
                    .and_then(clean_cell)
                    .map_or(CellValue::Missing, CellValue::Text);
                (header.clone(), value)
            })
            .collect();
        rows.push(RawRow::Record(cells));
    }

    debug!(
        columns = headers.len(),
        rows = rows.len(),
        skipped,
        "parsed delimited text"
    );
    Ok(TabularInput::new(headers, rows))
}

/// Reads a CSV file. See [`read_csv_bytes`].
pub fn read_csv_file(path: &Path) -> Result<TabularInput> {
    validate_encoding(path)?;
    let bytes = read_bytes(path)?;
    read_csv_bytes(&bytes)
}
