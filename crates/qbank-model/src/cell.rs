//! Raw input records as produced by tabular parsers and extraction steps.

use qbank_common::format_numeric;

/// A single scalar value read from a source cell.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Missing,
    /// A nested list or object where a scalar was expected, kept as JSON text.
    Composite(String),
}

impl CellValue {
    /// Renders the value as text. `Missing` renders as `None`.
    ///
    /// Integral numbers print without a fractional part, so a spreadsheet
    /// cell holding `2.0` reads as `"2"`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.clone()),
            Self::Number(value) => Some(format_numeric(*value)),
            Self::Bool(value) => Some(value.to_string()),
            Self::Missing => None,
            Self::Composite(json) => Some(json.clone()),
        }
    }

    /// True when the value is missing or renders to whitespace only.
    pub fn is_blank(&self) -> bool {
        self.to_text().is_none_or(|text| text.trim().is_empty())
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// One imported row: header/value pairs in source order.
///
/// Headers are kept exactly as they appeared in the source; normalization is
/// the row processor's job.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawRecord {
    cells: Vec<(String, CellValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((header.into(), value.into()));
    }

    /// Builder form of [`RawRecord::push`].
    #[must_use]
    pub fn with(mut self, header: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(header, value);
        self
    }

    /// Returns the last value stored under exactly this header.
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .rev()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(header, value)| (header.into(), value.into()))
                .collect(),
        }
    }
}

/// An input row as handed to the batch pipeline.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RawRow {
    /// A structured key/value record.
    Record(RawRecord),
    /// An absent value or something that is not a key/value record.
    Malformed { reason: String },
}

impl RawRow {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub fn as_record(&self) -> Option<&RawRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<RawRecord> for RawRow {
    fn from(record: RawRecord) -> Self {
        Self::Record(record)
    }
}

/// Result of parsing a delimited text file or a workbook sheet.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TabularInput {
    /// Header row in source order.
    pub headers: Vec<String>,
    /// Data rows in source order.
    pub rows: Vec<RawRow>,
}

impl TabularInput {
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_rendering() {
        assert_eq!(CellValue::from("abc").to_text(), Some("abc".to_string()));
        assert_eq!(CellValue::Number(2.0).to_text(), Some("2".to_string()));
        assert_eq!(CellValue::Number(2.5).to_text(), Some("2.5".to_string()));
        assert_eq!(CellValue::Bool(true).to_text(), Some("true".to_string()));
        assert_eq!(CellValue::Missing.to_text(), None);
    }

    #[test]
    fn blank_cells() {
        assert!(CellValue::Missing.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::from(" x ").is_blank());
    }

    #[test]
    fn record_get_returns_last_duplicate() {
        let record = RawRecord::new()
            .with("Question", "first")
            .with("Question", "second");
        assert_eq!(record.get("Question"), Some(&CellValue::from("second")));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn optional_values_map_to_missing() {
        let none: Option<&str> = None;
        assert_eq!(CellValue::from(none), CellValue::Missing);
        assert_eq!(CellValue::from(Some("x")), CellValue::from("x"));
    }
}
