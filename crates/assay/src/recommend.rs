//! Ranked improvement recommendations derived from profiles and metrics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::profile::{ColumnProfile, IssueKind, Severity};
use crate::score::QualityMetrics;

/// Recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// What a recommendation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MissingData,
    HighNullValues,
    OutliersDetected,
    InvalidEmails,
    OverallQuality,
}

impl From<IssueKind> for Category {
    fn from(kind: IssueKind) -> Self {
        match kind {
            IssueKind::HighNullValues => Category::HighNullValues,
            IssueKind::OutliersDetected => Category::OutliersDetected,
            IssueKind::InvalidEmails => Category::InvalidEmails,
        }
    }
}

/// A prioritized, actionable suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Priority level.
    pub priority: Priority,
    /// Category of the underlying problem.
    pub category: Category,
    /// Affected column, when column-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Human-readable suggestion text.
    pub suggestion: String,
    /// Machine-consumable hint, e.g. a query template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Generates recommendations from column profiles and aggregate metrics.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    /// Maximum recommendations per report.
    cap: usize,
    /// Null percentage strictly above this gets a missing-data entry.
    null_threshold: f64,
    /// Overall quality below this appends a final overall entry.
    overall_threshold: f64,
}

impl RecommendationEngine {
    /// Create an engine with the default limits (cap 10, thresholds 20/70).
    pub fn new() -> Self {
        Self {
            cap: 10,
            null_threshold: 20.0,
            overall_threshold: 70.0,
        }
    }

    /// Create an engine with custom limits.
    pub fn with_limits(cap: usize, null_threshold: f64, overall_threshold: f64) -> Self {
        Self {
            cap,
            null_threshold,
            overall_threshold,
        }
    }

    /// Build the capped recommendation list.
    ///
    /// Order is fixed: missing-data entries in column order, then one
    /// entry per issue in column-then-issue order, then the overall
    /// entry if triggered. Repeated issue kinds on different columns
    /// each produce their own entry; no de-duplication.
    pub fn generate(
        &self,
        profiles: &IndexMap<String, ColumnProfile>,
        metrics: &QualityMetrics,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        for profile in profiles.values() {
            if profile.null_percentage > self.null_threshold {
                recommendations.push(Recommendation {
                    priority: Priority::High,
                    category: Category::MissingData,
                    column: Some(profile.name.clone()),
                    suggestion: format!(
                        "Column '{}' is {:.2}% missing; backfill the values or drop the column",
                        profile.name, profile.null_percentage
                    ),
                    hint: Some(format!(
                        "SELECT * FROM dataset WHERE {} IS NULL",
                        profile.name
                    )),
                });
            }
        }

        for profile in profiles.values() {
            for issue in &profile.issues {
                recommendations.push(Recommendation {
                    priority: if issue.severity == Severity::Error {
                        Priority::High
                    } else {
                        Priority::Medium
                    },
                    category: issue.kind.into(),
                    column: Some(profile.name.clone()),
                    suggestion: issue.message.clone(),
                    hint: None,
                });
            }
        }

        if metrics.overall_quality < self.overall_threshold {
            recommendations.push(Recommendation {
                priority: Priority::High,
                category: Category::OverallQuality,
                column: None,
                suggestion: format!(
                    "Overall quality score is {:.2}; address the issues above before downstream use",
                    metrics.overall_quality
                ),
                hint: None,
            });
        }

        recommendations.truncate(self.cap);
        recommendations
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Record;
    use crate::profile::ColumnProfiler;
    use crate::score::score_profiles;
    use serde_json::{json, Value};

    fn profiles_for(columns: Vec<(&str, Vec<Value>)>) -> IndexMap<String, ColumnProfile> {
        let rows = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let records: Vec<Record> = (0..rows)
            .map(|i| {
                columns
                    .iter()
                    .map(|(name, values)| {
                        (
                            name.to_string(),
                            values.get(i).cloned().unwrap_or(Value::Null),
                        )
                    })
                    .collect()
            })
            .collect();

        columns
            .iter()
            .map(|(name, _)| {
                (
                    name.to_string(),
                    ColumnProfiler::new().profile(&records, name),
                )
            })
            .collect()
    }

    #[test]
    fn test_missing_data_comes_first() {
        let profiles = profiles_for(vec![
            (
                "half_null",
                vec![json!("a"), Value::Null, json!("b"), Value::Null],
            ),
            (
                "numbers",
                vec![json!(1), json!(2), json!(3), json!(4)],
            ),
        ]);
        let metrics = score_profiles(&profiles);
        let recs = RecommendationEngine::new().generate(&profiles, &metrics);

        assert_eq!(recs[0].category, Category::MissingData);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].column.as_deref(), Some("half_null"));
        // The same column's high_null_values issue also gets an entry
        assert!(recs
            .iter()
            .any(|r| r.category == Category::HighNullValues && r.priority == Priority::Medium));
    }

    #[test]
    fn test_error_issues_are_high_priority() {
        use crate::profile::{Issue, IssueKind, Severity};

        let mut profiles = profiles_for(vec![("emails", vec![json!("a@b.com"), json!("c@d.org")])]);
        // Force an error-severity issue onto the profile
        profiles["emails"].issues.push(Issue {
            kind: IssueKind::InvalidEmails,
            severity: Severity::Error,
            message: "1 invalid email address(es) in 'emails'".to_string(),
            count: Some(1),
        });
        let metrics = score_profiles(&profiles);
        let recs = RecommendationEngine::new().generate(&profiles, &metrics);

        let email_rec = recs
            .iter()
            .find(|r| r.category == Category::InvalidEmails)
            .expect("email recommendation");
        assert_eq!(email_rec.priority, Priority::High);
        assert_eq!(email_rec.suggestion, "1 invalid email address(es) in 'emails'");
    }

    #[test]
    fn test_low_overall_appends_final_entry() {
        let profiles = profiles_for(vec![(
            "sparse",
            vec![Value::Null, Value::Null, Value::Null, Value::Null],
        )]);
        let metrics = score_profiles(&profiles);
        assert!(metrics.overall_quality < 70.0);

        let recs = RecommendationEngine::new().generate(&profiles, &metrics);
        let last = recs.last().expect("recommendations");
        assert_eq!(last.category, Category::OverallQuality);
        assert!(last.column.is_none());
    }

    #[test]
    fn test_cap_truncates_in_order() {
        // 12 half-null columns -> 24 raw entries, capped to 10
        let columns: Vec<(String, Vec<Value>)> = (0..12)
            .map(|i| {
                (
                    format!("col{}", i),
                    vec![json!("a"), Value::Null, json!("b"), Value::Null],
                )
            })
            .collect();
        let borrowed: Vec<(&str, Vec<Value>)> = columns
            .iter()
            .map(|(n, v)| (n.as_str(), v.clone()))
            .collect();
        let profiles = profiles_for(borrowed);
        let metrics = score_profiles(&profiles);

        let recs = RecommendationEngine::new().generate(&profiles, &metrics);
        assert_eq!(recs.len(), 10);
        // All ten surviving entries are the missing-data pass, in column order
        assert!(recs.iter().all(|r| r.category == Category::MissingData));
        assert_eq!(recs[9].column.as_deref(), Some("col9"));
    }
}
