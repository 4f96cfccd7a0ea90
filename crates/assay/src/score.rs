//! Aggregate quality scoring across column profiles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::profile::{round2, ColumnProfile, Severity};

/// The four quality dimensions plus their mean, each rounded to two
/// decimals.
///
/// Consistency and validity are clamped to 100; completeness and
/// accuracy are not clamped upward. That asymmetry is part of the
/// report contract and is reproduced as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub completeness: f64,
    pub consistency: f64,
    pub accuracy: f64,
    pub validity: f64,
    /// Arithmetic mean of the four dimensions.
    pub overall_quality: f64,
}

/// Per-column contributions, accumulated by the fold in [`score_profiles`].
#[derive(Debug, Default)]
struct DimensionSums {
    completeness: f64,
    consistency: f64,
    accuracy: f64,
    validity: f64,
}

impl DimensionSums {
    fn add(mut self, profile: &ColumnProfile) -> Self {
        let total = profile.total_count as f64;
        let (null_ratio, duplicate_ratio) = if profile.total_count == 0 {
            (0.0, 0.0)
        } else {
            (
                profile.null_count as f64 / total,
                profile.duplicate_count as f64 / total,
            )
        };
        let error_issues = profile
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count() as f64;

        self.completeness += (1.0 - null_ratio) * 100.0;
        self.consistency += 100.0 - duplicate_ratio.abs() * 50.0;
        self.accuracy += (100.0 - error_issues * 20.0).max(0.0);
        self.validity += 100.0 - error_issues * 25.0;
        self
    }
}

/// Fold column profiles into the four dimension scores and their mean.
///
/// Zero columns yields all-zero metrics rather than a division by zero;
/// the orchestrator's validation normally prevents that input from
/// arriving here at all.
pub fn score_profiles(profiles: &IndexMap<String, ColumnProfile>) -> QualityMetrics {
    if profiles.is_empty() {
        return QualityMetrics::default();
    }

    let sums = profiles
        .values()
        .fold(DimensionSums::default(), |acc, profile| acc.add(profile));

    let count = profiles.len() as f64;
    let completeness = round2(sums.completeness / count);
    let consistency = round2((sums.consistency / count).min(100.0));
    let accuracy = round2(sums.accuracy / count);
    let validity = round2((sums.validity / count).min(100.0));
    let overall_quality = round2((completeness + consistency + accuracy + validity) / 4.0);

    QualityMetrics {
        completeness,
        consistency,
        accuracy,
        validity,
        overall_quality,
    }
}
