//! The `analyze` command: profile a file and print its quality report.

use std::path::PathBuf;

use colored::Colorize;

use assay::{AnalysisReport, Assay, AssayError, Priority, Result, Severity};

pub fn run(file: PathBuf, output: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
    let report = Assay::new().analyze_file(&file)?;

    if let Some(path) = output {
        let serialized = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, serialized).map_err(|e| AssayError::Io {
            path: path.clone(),
            source: e,
        })?;
        println!("Report written to {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&report, verbose);
    Ok(())
}

fn print_summary(report: &AnalysisReport, verbose: bool) {
    if let Some(ref error) = report.error {
        println!("{} {}", "Analysis failed:".red().bold(), error);
        return;
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Analyzed".bold(),
        report.file_name,
        report.row_count,
        report.column_count
    );

    if let Some(score) = report.quality_score {
        let rendered = format!("{}/100", score);
        let colored_score = if score >= 90 {
            rendered.green()
        } else if score >= 70 {
            rendered.yellow()
        } else {
            rendered.red()
        };
        println!("{} {}", "Quality score:".bold(), colored_score);
    }

    if let Some(metrics) = report.metrics {
        println!(
            "  completeness {:.2}  consistency {:.2}  accuracy {:.2}  validity {:.2}",
            metrics.completeness, metrics.consistency, metrics.accuracy, metrics.validity
        );
    }

    let issue_count: usize = report
        .column_analysis
        .values()
        .map(|p| p.issues.len())
        .sum();
    println!("{} {}", "Issues:".bold(), issue_count);

    for profile in report.column_analysis.values() {
        if !verbose && profile.issues.is_empty() {
            continue;
        }
        println!(
            "  {} ({})",
            profile.name.bold(),
            profile.inferred_type.label()
        );
        if verbose {
            println!(
                "    {} rows, {:.2}% null, {} unique",
                profile.total_count, profile.null_percentage, profile.unique_count
            );
        }
        for issue in &profile.issues {
            let severity = match issue.severity {
                Severity::Error => "error".red(),
                Severity::Warning => "warning".yellow(),
                Severity::Info => "info".cyan(),
            };
            println!("    [{}] {}", severity, issue.message);
        }
    }

    let recommendations = report.recommendations.as_deref().unwrap_or_default();
    if !recommendations.is_empty() {
        println!("{}", "Recommendations:".bold());
        for rec in recommendations {
            let priority = match rec.priority {
                Priority::High => "high".red(),
                Priority::Medium => "medium".yellow(),
                Priority::Low => "low".cyan(),
            };
            println!("  [{}] {}", priority, rec.suggestion);
        }
    }
}
