//! Workbook sheet reading via calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use qbank_common::clean_cell;
use qbank_model::{CellValue, RawRecord, RawRow, TabularInput};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads one sheet of a workbook as a header row plus records.
///
/// Uses the named sheet when given, otherwise the first sheet. The first
/// row is the header row; rows where every cell is empty are skipped.
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<TabularInput> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|candidate| candidate.as_str() == name)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: name.to_string(),
                available: sheet_names.clone(),
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| IngestError::Workbook {
                path: path.to_path_buf(),
                message: "no worksheet found".to_string(),
            })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Err(IngestError::EmptySheet {
            path: path.to_path_buf(),
            sheet: sheet_name,
        });
    };
    let headers: Vec<String> = header_row.iter().map(header_text).collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptySheet {
            path: path.to_path_buf(),
            sheet: sheet_name,
        });
    }

    let rows = rows_from_cells(&headers, rows_iter);
    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        columns = headers.len(),
        rows = rows.len(),
        "parsed workbook sheet"
    );
    Ok(TabularInput::new(headers, rows))
}

fn rows_from_cells<'a>(
    headers: &[String],
    rows: impl Iterator<Item = &'a [Data]>,
) -> Vec<RawRow> {
    rows.filter(|cells| cells.iter().any(|cell| !cell_value(cell).is_blank()))
        .map(|cells| {
            let record: RawRecord = headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = cells.get(idx).map_or(CellValue::Missing, cell_value);
                    (header.clone(), value)
                })
                .collect();
            RawRow::Record(record)
        })
        .collect()
}

fn header_text(cell: &Data) -> String {
    match cell_value(cell).to_text() {
        Some(text) => text.trim().to_string(),
        None => String::new(),
    }
}

/// Converts one workbook cell into a [`CellValue`].
///
/// Error cells read as missing. Dates keep calamine's text rendering.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(text) => clean_cell(text).map_or(CellValue::Missing, CellValue::Text),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Bool(*value),
        other => CellValue::Text(other.to_string()),
    }
}
