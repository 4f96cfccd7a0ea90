//! IQR-rule outlier detection for numeric columns.

use serde::{Deserialize, Serialize};

/// Multiplier applied to the IQR when computing the fences.
const IQR_MULTIPLIER: f64 = 1.5;

/// Below this many values the quartiles are too unstable to use.
const MIN_SAMPLES: usize = 4;

/// Outcome of the interquartile-range test on one column.
///
/// Informational only: outliers are reported, never filtered out of the
/// dataset or its aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Number of values outside the fences.
    pub count: usize,
    /// The outlying values themselves.
    pub values: Vec<f64>,
    /// Lower fence (q1 - 1.5 * IQR).
    pub lower_bound: f64,
    /// Upper fence (q3 + 1.5 * IQR).
    pub upper_bound: f64,
}

impl OutlierReport {
    fn empty() -> Self {
        Self {
            count: 0,
            values: Vec::new(),
            lower_bound: 0.0,
            upper_bound: 0.0,
        }
    }
}

/// Flag values strictly outside `[q1 - 1.5*IQR, q3 + 1.5*IQR]`.
///
/// Quartiles are positional, not interpolated: the sorted value at index
/// `floor(n * 0.25)` and `floor(n * 0.75)`. Fewer than four values
/// short-circuits to zero outliers.
pub fn detect_outliers(values: &[f64]) -> OutlierReport {
    let n = values.len();
    if n < MIN_SAMPLES {
        return OutlierReport::empty();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = sorted[(n as f64 * 0.25).floor() as usize];
    let q3 = sorted[(n as f64 * 0.75).floor() as usize];
    let iqr = q3 - q1;
    let lower_bound = q1 - IQR_MULTIPLIER * iqr;
    let upper_bound = q3 + IQR_MULTIPLIER * iqr;

    let outliers: Vec<f64> = values
        .iter()
        .copied()
        .filter(|&v| v < lower_bound || v > upper_bound)
        .collect();

    OutlierReport {
        count: outliers.len(),
        values: outliers,
        lower_bound,
        upper_bound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_quartiles() {
        // n=6: q1 at floor(1.5)=1 -> 2, q3 at floor(4.5)=4 -> 5
        let report = detect_outliers(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);

        assert_eq!(report.lower_bound, -2.5);
        assert_eq!(report.upper_bound, 9.5);
        assert_eq!(report.count, 1);
        assert_eq!(report.values, vec![100.0]);
    }

    #[test]
    fn test_no_outliers() {
        let report = detect_outliers(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(report.count, 0);
    }

    #[test]
    fn test_short_list_short_circuits() {
        let report = detect_outliers(&[1.0, 2.0, 1000.0]);
        assert_eq!(report.count, 0);
        assert!(report.values.is_empty());
    }

    #[test]
    fn test_boundary_values_are_inside() {
        // Strict comparison: a value exactly on the fence is not an outlier
        let report = detect_outliers(&[1.0, 2.0, 3.0, 4.0, 5.0, 9.5]);
        assert_eq!(report.upper_bound, 9.5);
        assert_eq!(report.count, 0);
    }

    #[test]
    fn test_unsorted_input() {
        let report = detect_outliers(&[100.0, 3.0, 1.0, 5.0, 2.0, 4.0]);
        assert_eq!(report.count, 1);
    }
}
