//! Record model and null-value conventions.

use indexmap::IndexMap;
use serde_json::Value;

/// One row of a dataset: an ordered mapping from column name to raw value.
///
/// Values are raw JSON scalars (string, number, boolean, or null). Rows
/// missing a column present in the first record are tolerated; the absent
/// key reads as null-like.
pub type Record = IndexMap<String, Value>;

/// Column names of a dataset, taken from the first record in original order.
pub fn column_names(records: &[Record]) -> Vec<String> {
    records
        .first()
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default()
}

/// Check if a raw value represents a missing/null value.
///
/// `None` covers keys absent from a ragged row. String matching is
/// ASCII case-insensitive.
pub fn is_null_like(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed.is_empty()
                || trimmed.eq_ignore_ascii_case("null")
                || trimmed.eq_ignore_ascii_case("undefined")
        }
        Some(_) => false,
    }
}

/// Canonical string rendering of a scalar value.
///
/// Strings render as themselves (no added quotes); numbers and booleans
/// through their shortest display form. The type cascade and uniqueness
/// counting both go through this so string and native inputs compare
/// consistently.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Parse a raw value as a finite number, for numeric aggregates.
///
/// More lenient than the round-trip rule used for classification: any
/// cleanly parseable string counts. Values that do not parse are skipped
/// by the caller rather than poisoning min/max/mean/median.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
