//! Assay: quality profiler for tabular datasets.
//!
//! Assay takes an in-memory dataset (an ordered sequence of uniform
//! records) and produces a structured quality report: per-column
//! statistics and inferred types, detected issues, four aggregate
//! quality dimensions with an overall 0-100 score, and a ranked list of
//! improvement recommendations.
//!
//! # Core Principles
//!
//! - **Pure**: analysis is a synchronous function of its input; no
//!   state survives a call and the input is never mutated
//! - **All-or-nothing**: once validation passes the full report is
//!   produced; malformed input yields a degraded report value, not an
//!   error or a panic
//! - **Stable contract**: report field names and rounding are consumed
//!   verbatim by downstream components
//!
//! # Example
//!
//! ```no_run
//! use assay::Assay;
//!
//! let assay = Assay::new();
//! let report = assay.analyze_file("customers.csv").unwrap();
//!
//! println!("Quality score: {}", report.quality_score.unwrap_or(0));
//! println!("Columns: {}", report.column_count);
//! ```

pub mod error;
pub mod input;
pub mod profile;
pub mod recommend;
pub mod score;

mod assay;

pub use crate::assay::{type_distribution, AnalysisReport, Assay, AssayConfig};
pub use error::{AssayError, Result};
pub use input::{load_records, Record};
pub use profile::{ColumnProfile, Issue, IssueKind, OutlierReport, Severity, ValueType};
pub use recommend::{Category, Priority, Recommendation};
pub use score::QualityMetrics;
