//! Per-column profiling: type classification, statistics, and issues.

mod classify;
mod column;
mod outlier;
mod types;

pub use classify::classify;
pub use column::{ColumnProfile, ColumnProfiler, Issue, IssueKind, Severity};
pub use outlier::{detect_outliers, OutlierReport};
pub use types::ValueType;

/// Round to two decimal places, the convention for every reported statistic.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn test_round2() {
        assert_eq!(round2(10.0 / 3.0), 3.33);
        assert_eq!(round2(95.005), 95.01);
        assert_eq!(round2(0.0), 0.0);
    }
}
