//! Main Assay struct and public API.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::input::{column_names, load_records, Record};
use crate::profile::{ColumnProfile, ColumnProfiler, ValueType};
use crate::recommend::{Recommendation, RecommendationEngine};
use crate::score::{score_profiles, QualityMetrics};

/// Configuration for an analysis run.
///
/// The defaults are the report contract; changing them changes the
/// output other components consume.
#[derive(Debug, Clone)]
pub struct AssayConfig {
    /// Maximum sample values kept per column profile.
    pub sample_limit: usize,
    /// Maximum records echoed back in the report preview.
    pub preview_limit: usize,
    /// Null percentage strictly above this raises issues and recommendations.
    pub null_threshold: f64,
    /// Overall quality below this appends a final recommendation.
    pub overall_threshold: f64,
    /// Maximum recommendations per report.
    pub recommendation_cap: usize,
}

impl Default for AssayConfig {
    fn default() -> Self {
        Self {
            sample_limit: 5,
            preview_limit: 100,
            null_threshold: 20.0,
            overall_threshold: 70.0,
            recommendation_cap: 10,
        }
    }
}

/// The assembled quality report for one dataset.
///
/// Returned by value; the engine keeps no reference after returning.
/// Field names and the two-decimal rounding are consumed verbatim by
/// external collaborators and must not change silently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Present only on validation failure; all other fields degrade to
    /// zero/empty and callers must check this before reading them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Opaque label echoed from the caller.
    pub file_name: String,
    /// Number of records analyzed.
    pub row_count: usize,
    /// Number of columns analyzed.
    pub column_count: usize,
    /// Column names from the first record, in original order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub columns: Vec<String>,
    /// Bounded echo of the leading records.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub preview: Vec<Record>,
    /// Per-column profiles, keyed by column name in column order.
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub column_analysis: IndexMap<String, ColumnProfile>,
    /// Aggregate quality dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<QualityMetrics>,
    /// Ranked, capped improvement suggestions. `Some` (possibly empty)
    /// on every successful report; `None` only on the degraded shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
    /// `overallQuality` rounded to the nearest integer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<i64>,
    /// Flattened column name to inferred type mapping.
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub types_by_column: IndexMap<String, ValueType>,
}

impl AnalysisReport {
    /// The degraded shape returned when validation fails: error text,
    /// echoed file name, zero counts, nothing else.
    fn degraded(message: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            file_name: file_name.into(),
            row_count: 0,
            column_count: 0,
            columns: Vec::new(),
            preview: Vec::new(),
            column_analysis: IndexMap::new(),
            metrics: None,
            recommendations: None,
            quality_score: None,
            types_by_column: IndexMap::new(),
        }
    }

    /// True when validation failed and the analysis fields are empty.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// The analysis engine: validates a dataset, profiles every column,
/// scores the profiles, and assembles the report.
///
/// Stateless across invocations; a single instance can be shared and
/// called from multiple threads.
#[derive(Debug, Clone)]
pub struct Assay {
    config: AssayConfig,
    profiler: ColumnProfiler,
    recommender: RecommendationEngine,
}

impl Assay {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AssayConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: AssayConfig) -> Self {
        let profiler = ColumnProfiler::with_limits(config.null_threshold, config.sample_limit);
        let recommender = RecommendationEngine::with_limits(
            config.recommendation_cap,
            config.null_threshold,
            config.overall_threshold,
        );

        Self {
            config,
            profiler,
            recommender,
        }
    }

    /// Analyze an in-memory dataset.
    ///
    /// All-or-nothing: an empty dataset yields a degraded report value
    /// (never a panic or an `Err`); once validation passes the full
    /// report is always produced. The input is never mutated.
    pub fn analyze_records(&self, records: &[Record], file_name: &str) -> AnalysisReport {
        if records.is_empty() {
            return AnalysisReport::degraded("no records to analyze", file_name);
        }

        let columns = column_names(records);

        let column_analysis: IndexMap<String, ColumnProfile> = columns
            .iter()
            .map(|column| (column.clone(), self.profiler.profile(records, column)))
            .collect();

        let metrics = score_profiles(&column_analysis);
        let recommendations = self.recommender.generate(&column_analysis, &metrics);

        let types_by_column: IndexMap<String, ValueType> = column_analysis
            .iter()
            .map(|(name, profile)| (name.clone(), profile.inferred_type))
            .collect();

        AnalysisReport {
            error: None,
            file_name: file_name.to_string(),
            row_count: records.len(),
            column_count: columns.len(),
            preview: records
                .iter()
                .take(self.config.preview_limit)
                .cloned()
                .collect(),
            columns,
            column_analysis,
            quality_score: Some(metrics.overall_quality.round() as i64),
            metrics: Some(metrics),
            recommendations: Some(recommendations),
            types_by_column,
        }
    }

    /// Analyze a raw JSON value, tolerating non-dataset input.
    ///
    /// Anything other than an array of objects degrades instead of
    /// failing, mirroring [`Self::analyze_records`].
    pub fn analyze_value(&self, data: &Value, file_name: &str) -> AnalysisReport {
        let Value::Array(items) = data else {
            return AnalysisReport::degraded("input is not a sequence of records", file_name);
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let Value::Object(map) = item else {
                return AnalysisReport::degraded("input is not a sequence of records", file_name);
            };
            records.push(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
        }

        self.analyze_records(&records, file_name)
    }

    /// Load a file and analyze it. I/O and decode failures are real
    /// errors; dataset-shape failures still degrade.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisReport> {
        let path = path.as_ref();
        let records = load_records(path)?;
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(self.analyze_records(&records, &file_name))
    }
}

impl Default for Assay {
    fn default() -> Self {
        Self::new()
    }
}

/// Tally inferred types across columns, for the distribution consumer.
pub fn type_distribution(
    types_by_column: &IndexMap<String, ValueType>,
) -> IndexMap<ValueType, usize> {
    let mut distribution = IndexMap::new();
    for inferred in types_by_column.values() {
        *distribution.entry(*inferred).or_insert(0) += 1;
    }
    distribution
}
