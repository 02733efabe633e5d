//! Conversion of normalized rows into persistence records.

use qbank_model::{NormalizedQuestion, QuestionRecord};
use serde_json::{Map, Value};

/// Strips bookkeeping from rows, keeping only the persisted columns.
///
/// Row index, error tags, validation log and answer index are dropped. The
/// function is total: every row produces a record, whatever its errors.
pub fn sanitize_for_db<'a, I>(rows: I) -> Vec<QuestionRecord>
where
    I: IntoIterator<Item = &'a NormalizedQuestion>,
{
    rows.into_iter().map(sanitize_row).collect()
}

/// Sanitizes one row.
pub fn sanitize_row(row: &NormalizedQuestion) -> QuestionRecord {
    QuestionRecord {
        exam_id: row.exam_id.to_string(),
        question: row.question.clone(),
        option_a: row.option_a.clone(),
        option_b: row.option_b.clone(),
        option_c: row.option_c.clone(),
        option_d: row.option_d.clone(),
        correct_option: row.correct_option.clone(),
    }
}

/// Maps an absent value to `""`.
pub fn sanitize_value(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Sanitizes a loosely-typed record into a JSON object with exactly the
/// persisted keys.
///
/// Missing keys and `null` become `""`, numbers and booleans are
/// stringified, nested values keep their JSON text. A non-object input
/// yields an all-empty record.
pub fn sanitize_json(value: &Value) -> Value {
    let object = value.as_object();
    let mut out = Map::with_capacity(QuestionRecord::KEYS.len());
    for key in QuestionRecord::KEYS {
        let text = object
            .and_then(|object| object.get(key))
            .map(json_text)
            .unwrap_or_default();
        out.insert(key.to_string(), Value::String(text));
    }
    Value::Object(out)
}

fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
