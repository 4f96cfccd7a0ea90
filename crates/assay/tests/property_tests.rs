//! Property-based tests for the analysis engine.
//!
//! These tests use proptest to generate random datasets and verify that
//! the engine maintains its invariants under all conditions:
//!
//! 1. **No panics**: analysis never crashes on any input
//! 2. **Determinism**: same input always produces the same report
//! 3. **Bounds**: counts and percentages stay within their ranges

use proptest::prelude::*;
use serde_json::{json, Value};

use assay::{Assay, Record};

/// Arbitrary scalar cell values, including null-like ones.
fn cell_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        Just(json!("null")),
        "[a-zA-Z0-9@\\. _-]{0,20}".prop_map(|s| json!(s)),
        any::<i32>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
    ]
}

/// Datasets with a shared column set of 1..5 columns and 1..30 rows.
fn dataset() -> impl Strategy<Value = Vec<Record>> {
    (1usize..5, 1usize..30).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(
            prop::collection::vec(cell_value(), cols..=cols),
            rows..=rows,
        )
        .prop_map(move |matrix| {
            matrix
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .enumerate()
                        .map(|(i, v)| (format!("col{}", i), v))
                        .collect::<Record>()
                })
                .collect()
        })
    })
}

proptest! {
    #[test]
    fn analysis_never_panics(records in dataset()) {
        let _ = Assay::new().analyze_records(&records, "fuzz");
    }

    #[test]
    fn analysis_is_deterministic(records in dataset()) {
        let assay = Assay::new();
        let first = assay.analyze_records(&records, "fuzz");
        let second = assay.analyze_records(&records, "fuzz");

        prop_assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn counts_and_percentages_stay_bounded(records in dataset()) {
        let report = Assay::new().analyze_records(&records, "fuzz");
        prop_assert!(!report.is_degraded());

        for profile in report.column_analysis.values() {
            prop_assert_eq!(profile.total_count, records.len());
            prop_assert!(profile.null_count <= profile.total_count);
            prop_assert!(profile.unique_count <= profile.total_count - profile.null_count);
            prop_assert!((0.0..=100.0).contains(&profile.null_percentage));
            prop_assert!((0.0..=100.0).contains(&profile.unique_percentage));
            prop_assert_eq!(
                profile.duplicate_count,
                profile.total_count - profile.unique_count
            );
        }
    }

    #[test]
    fn recommendations_respect_the_cap(records in dataset()) {
        let report = Assay::new().analyze_records(&records, "fuzz");
        prop_assert!(report.recommendations.unwrap().len() <= 10);
    }

    #[test]
    fn quality_score_rounds_overall(records in dataset()) {
        let report = Assay::new().analyze_records(&records, "fuzz");
        let metrics = report.metrics.unwrap();
        prop_assert_eq!(
            report.quality_score.unwrap(),
            metrics.overall_quality.round() as i64
        );
    }
}
