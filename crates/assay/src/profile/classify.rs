//! Column type classification.
//!
//! Classification is an ordered conjunctive cascade: the first rule that
//! every non-null value passes wins. The order (email, boolean, date,
//! numeric, url, text) is part of the report contract — a column of
//! "0"/"1" strings is boolean, not numeric, because boolean is tried
//! first. Do not reorder without versioning the output.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::input::{is_null_like, render};

use super::types::ValueType;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Date-only formats accepted by the date rule.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Datetime formats accepted by the date rule (RFC 3339 is tried separately).
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Classify a column from the full ordered list of its raw values.
///
/// `values` holds one entry per row; `None` marks a key absent from a
/// ragged row. Null-like values are ignored; if nothing remains the
/// result is [`ValueType::Unknown`].
pub fn classify(values: &[Option<&Value>]) -> ValueType {
    let non_null: Vec<&Value> = values
        .iter()
        .filter(|v| !is_null_like(**v))
        .flatten()
        .copied()
        .collect();

    if non_null.is_empty() {
        return ValueType::Unknown;
    }

    if non_null.iter().all(|v| is_email_value(v)) {
        return ValueType::Email;
    }
    if non_null.iter().all(|v| is_boolean_value(v)) {
        return ValueType::Boolean;
    }
    if non_null.iter().all(|v| is_date_value(v)) {
        return ValueType::Date;
    }
    if non_null.iter().all(|v| is_numeric_value(v)) {
        return ValueType::Numeric;
    }
    if non_null.iter().all(|v| is_url_value(v)) {
        return ValueType::Url;
    }

    ValueType::Text
}

/// Check a single value against the email pattern.
pub(crate) fn is_email_value(value: &Value) -> bool {
    EMAIL_PATTERN.is_match(&render(value))
}

fn is_boolean_value(value: &Value) -> bool {
    if value.is_boolean() {
        return true;
    }
    matches!(
        render(value).trim().to_lowercase().as_str(),
        "true" | "false" | "1" | "0" | "yes" | "no"
    )
}

fn is_date_value(value: &Value) -> bool {
    let rendered = render(value);
    let trimmed = rendered.trim();

    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).is_ok())
        || DateTime::parse_from_rfc3339(trimmed).is_ok()
}

/// The numeric rule requires a clean round-trip: the parsed number must
/// render back to the original text, so "25abc", "1e3", and "25.0" are
/// all rejected. Native JSON numbers pass by construction.
fn is_numeric_value(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite()),
        Value::String(s) => match s.parse::<f64>() {
            Ok(n) if n.is_finite() => n.to_string() == *s,
            _ => false,
        },
        _ => false,
    }
}

fn is_url_value(value: &Value) -> bool {
    Url::parse(render(value).trim()).is_ok()
}
