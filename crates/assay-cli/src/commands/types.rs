//! The `types` command: print the inferred type distribution.

use std::path::PathBuf;

use colored::Colorize;

use assay::{type_distribution, Assay, Result};

pub fn run(file: PathBuf, json: bool) -> Result<()> {
    let report = Assay::new().analyze_file(&file)?;

    if let Some(ref error) = report.error {
        println!("{} {}", "Analysis failed:".red().bold(), error);
        return Ok(());
    }

    let distribution = type_distribution(&report.types_by_column);

    if json {
        println!("{}", serde_json::to_string_pretty(&distribution)?);
        return Ok(());
    }

    println!("{} {}", "Type distribution for".bold(), report.file_name);
    for (inferred, count) in &distribution {
        println!("  {:<8} {}", inferred.label(), count);
    }

    Ok(())
}
