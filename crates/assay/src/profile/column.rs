//! Column profiling: statistics, type inference, and issue detection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::{as_number, is_null_like, render, Record};

use super::classify::{classify, is_email_value};
use super::outlier::detect_outliers;
use super::round2;
use super::types::ValueType;

/// Kind of data quality issue detected on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// More than the threshold share of values are null-like.
    HighNullValues,
    /// Numeric values outside the IQR fences.
    OutliersDetected,
    /// Values failing the email pattern in an email column.
    InvalidEmails,
}

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, may not require action.
    Info,
    /// Potential issue that should be reviewed.
    Warning,
    /// Definite issue that should be addressed.
    Error,
}

/// A typed, severity-tagged finding attached to a column profile.
///
/// Issues are derived facts, recomputed on every run; the message always
/// carries the computed statistic since downstream consumers surface it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Kind of issue.
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable description including the computed statistic.
    pub message: String,
    /// Number of affected values, when countable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Issue {
    fn new(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            count: None,
        }
    }

    fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// The computed statistics and issues for one dataset column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Total number of rows.
    pub total_count: usize,
    /// Number of null-like values.
    pub null_count: usize,
    /// Null share as a percentage, two decimals.
    pub null_percentage: f64,
    /// Distinct non-null, non-empty values.
    pub unique_count: usize,
    /// Unique share as a percentage, two decimals.
    pub unique_percentage: f64,
    /// `total_count - unique_count`.
    pub duplicate_count: usize,
    /// Inferred column type.
    pub inferred_type: ValueType,
    /// First non-null values in row order, capped. Always serialized,
    /// empty or not; consumers rely on the key being present.
    pub sample_values: Vec<Value>,
    /// Minimum (numeric columns only), two decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum (numeric columns only), two decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Arithmetic mean (numeric columns only), two decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    /// Median (numeric columns only), two decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    /// Detected issues, in detection order. Always serialized, empty
    /// or not.
    pub issues: Vec<Issue>,
}

/// Profiles one column at a time: a pure function of (records, column).
#[derive(Debug, Clone)]
pub struct ColumnProfiler {
    /// Null percentage strictly above this raises `high_null_values`.
    null_threshold: f64,
    /// Maximum number of sample values kept on the profile.
    sample_limit: usize,
}

impl ColumnProfiler {
    /// Create a profiler with the default thresholds (20% nulls, 5 samples).
    pub fn new() -> Self {
        Self {
            null_threshold: 20.0,
            sample_limit: 5,
        }
    }

    /// Create a profiler with custom thresholds.
    pub fn with_limits(null_threshold: f64, sample_limit: usize) -> Self {
        Self {
            null_threshold,
            sample_limit,
        }
    }

    /// Profile a single column across all records.
    pub fn profile(&self, records: &[Record], column: &str) -> ColumnProfile {
        let values: Vec<Option<&Value>> = records.iter().map(|r| r.get(column)).collect();
        let total_count = values.len();

        let null_count = values.iter().filter(|v| is_null_like(**v)).count();

        let distinct: HashSet<String> = values
            .iter()
            .filter(|v| !is_null_like(**v))
            .flatten()
            .map(|v| render(v))
            .collect();
        let unique_count = distinct.len();

        let null_percentage = round2(percentage(null_count, total_count));
        let unique_percentage = round2(percentage(unique_count, total_count));
        let duplicate_count = total_count - unique_count;

        let inferred_type = classify(&values);

        let sample_values: Vec<Value> = values
            .iter()
            .filter(|v| !is_null_like(**v))
            .flatten()
            .take(self.sample_limit)
            .map(|v| (*v).clone())
            .collect();

        let mut issues = Vec::new();
        if null_percentage > self.null_threshold {
            issues.push(
                Issue::new(
                    IssueKind::HighNullValues,
                    Severity::Warning,
                    format!(
                        "{:.2}% of values in '{}' are missing",
                        null_percentage, column
                    ),
                )
                .with_count(null_count),
            );
        }

        let (min, max, mean, median) = match inferred_type {
            ValueType::Numeric => {
                let numbers: Vec<f64> = values
                    .iter()
                    .filter(|v| !is_null_like(**v))
                    .flatten()
                    .filter_map(|v| as_number(v))
                    .collect();

                let outliers = detect_outliers(&numbers);
                if outliers.count > 0 {
                    issues.push(
                        Issue::new(
                            IssueKind::OutliersDetected,
                            Severity::Info,
                            format!(
                                "{} value(s) in '{}' fall outside [{:.2}, {:.2}]",
                                outliers.count, column, outliers.lower_bound, outliers.upper_bound
                            ),
                        )
                        .with_count(outliers.count),
                    );
                }

                numeric_aggregates(&numbers)
            }
            ValueType::Email => {
                let invalid = invalid_email_count(&values);
                if invalid > 0 {
                    issues.push(
                        Issue::new(
                            IssueKind::InvalidEmails,
                            Severity::Error,
                            format!("{} invalid email address(es) in '{}'", invalid, column),
                        )
                        .with_count(invalid),
                    );
                }
                (None, None, None, None)
            }
            _ => (None, None, None, None),
        };

        ColumnProfile {
            name: column.to_string(),
            total_count,
            null_count,
            null_percentage,
            unique_count,
            unique_percentage,
            duplicate_count,
            inferred_type,
            sample_values,
            min,
            max,
            mean,
            median,
            issues,
        }
    }
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Guarded percentage: zero rows means zero percent, never NaN.
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Count non-null values failing the email pattern.
fn invalid_email_count(values: &[Option<&Value>]) -> usize {
    values
        .iter()
        .filter(|v| !is_null_like(**v))
        .flatten()
        .filter(|v| !is_email_value(v))
        .count()
}

/// Min, max, mean, and median over the parseable values, two decimals each.
///
/// Values that fail to parse as numbers are skipped rather than turning
/// the aggregates into NaN.
fn numeric_aggregates(numbers: &[f64]) -> (Option<f64>, Option<f64>, Option<f64>, Option<f64>) {
    if numbers.is_empty() {
        return (None, None, None, None);
    }

    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;

    let mut sorted = numbers.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    (
        Some(round2(min)),
        Some(round2(max)),
        Some(round2(mean)),
        Some(round2(median)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_records(column: &str, values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| {
                let mut record = Record::new();
                record.insert(column.to_string(), v);
                record
            })
            .collect()
    }

    #[test]
    fn test_null_statistics() {
        let records = make_records(
            "age",
            vec![json!("25"), json!(""), json!("30"), Value::Null, json!("35")],
        );
        let profile = ColumnProfiler::new().profile(&records, "age");

        assert_eq!(profile.total_count, 5);
        assert_eq!(profile.null_count, 2);
        assert_eq!(profile.null_percentage, 40.0);
        assert_eq!(profile.unique_count, 3);
        assert_eq!(profile.duplicate_count, 2);
        // nullCount + non-null count == totalCount
        assert_eq!(profile.null_count + 3, profile.total_count);
    }

    #[test]
    fn test_missing_keys_count_as_null() {
        let mut full = Record::new();
        full.insert("a".to_string(), json!("x"));
        full.insert("b".to_string(), json!("y"));
        let mut ragged = Record::new();
        ragged.insert("a".to_string(), json!("z"));

        let profile = ColumnProfiler::new().profile(&[full, ragged], "b");
        assert_eq!(profile.null_count, 1);
    }

    #[test]
    fn test_numeric_aggregates() {
        let records = make_records(
            "score",
            vec![json!("10"), json!("20"), json!("30"), json!("40")],
        );
        let profile = ColumnProfiler::new().profile(&records, "score");

        assert_eq!(profile.inferred_type, ValueType::Numeric);
        assert_eq!(profile.min, Some(10.0));
        assert_eq!(profile.max, Some(40.0));
        assert_eq!(profile.mean, Some(25.0));
        assert_eq!(profile.median, Some(25.0));
    }

    #[test]
    fn test_median_odd_count() {
        let records = make_records("n", vec![json!(1), json!(2), json!(100)]);
        let profile = ColumnProfiler::new().profile(&records, "n");

        assert_eq!(profile.median, Some(2.0));
        assert_eq!(profile.mean, Some(34.33));
    }

    #[test]
    fn test_outlier_issue() {
        let records = make_records(
            "v",
            vec![json!(1), json!(2), json!(3), json!(4), json!(5), json!(100)],
        );
        let profile = ColumnProfiler::new().profile(&records, "v");

        let issue = profile
            .issues
            .iter()
            .find(|i| i.kind == IssueKind::OutliersDetected)
            .expect("outlier issue");
        assert_eq!(issue.severity, Severity::Info);
        assert_eq!(issue.count, Some(1));
    }

    #[test]
    fn test_high_null_threshold_is_strict() {
        // Exactly 20% does not trigger the issue
        let mut values = vec![json!("x"); 4];
        values.push(Value::Null);
        let profile = ColumnProfiler::new().profile(&make_records("c", values), "c");
        assert_eq!(profile.null_percentage, 20.0);
        assert!(profile.issues.is_empty());

        // Above 20% does
        let mut values = vec![json!("x"); 3];
        values.push(Value::Null);
        let profile = ColumnProfiler::new().profile(&make_records("c", values), "c");
        assert_eq!(profile.null_percentage, 25.0);
        assert_eq!(profile.issues[0].kind, IssueKind::HighNullValues);
        assert_eq!(profile.issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_invalid_email_count() {
        let owned = vec![json!("a@b.com"), json!("not-an-email"), json!("c@d.org")];
        let refs: Vec<Option<&Value>> = owned.iter().map(Some).collect();
        assert_eq!(invalid_email_count(&refs), 1);
    }

    #[test]
    fn test_valid_email_column_has_no_issues() {
        let records = make_records("email", vec![json!("a@b.com"), json!("c@d.org")]);
        let profile = ColumnProfiler::new().profile(&records, "email");

        assert_eq!(profile.inferred_type, ValueType::Email);
        assert!(profile.issues.is_empty());
    }

    #[test]
    fn test_sample_values_in_row_order() {
        let records = make_records(
            "s",
            vec![
                Value::Null,
                json!("first"),
                json!("second"),
                json!("first"),
                json!("third"),
                json!("fourth"),
                json!("fifth"),
                json!("sixth"),
            ],
        );
        let profile = ColumnProfiler::new().profile(&records, "s");

        // First five non-null values, not deduplicated
        assert_eq!(
            profile.sample_values,
            vec![
                json!("first"),
                json!("second"),
                json!("first"),
                json!("third"),
                json!("fourth")
            ]
        );
    }

    #[test]
    fn test_empty_column_is_unknown() {
        let records = make_records("e", vec![Value::Null, json!("")]);
        let profile = ColumnProfiler::new().profile(&records, "e");

        assert_eq!(profile.inferred_type, ValueType::Unknown);
        assert_eq!(profile.unique_count, 0);
        assert!(profile.min.is_none());
    }
}
