//! File loading: CSV/TSV/JSON into records.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::{AssayError, Result};

use super::record::Record;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Load a data file into records.
///
/// Format is chosen by extension: `.csv`, `.tsv` (and `.txt`, with
/// delimiter auto-detection) or `.json` (a top-level array of flat
/// objects). A file with a header but no data rows loads as an empty
/// dataset; the analysis layer turns that into a degraded report.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();

    let mut file = File::open(path).map_err(|e| AssayError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).map_err(|e| AssayError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let extension = path
        .extension()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => load_delimited(&contents, b','),
        "tsv" => load_delimited(&contents, b'\t'),
        "txt" => load_delimited(&contents, detect_delimiter(&contents)?),
        "json" => load_json(&contents),
        other => Err(AssayError::UnsupportedFormat(format!(
            "'{}' (expected csv, tsv, txt, or json)",
            other
        ))),
    }
}

/// Parse delimited bytes into records, one per data row.
///
/// Cell values stay strings; type interpretation is the classifier's
/// job. Short rows are padded with null so every record carries the
/// full column set.
fn load_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AssayError::EmptyData("no header row found".to_string()));
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = row
                    .get(i)
                    .map(|cell| Value::String(cell.to_string()))
                    .unwrap_or(Value::Null);
                (name.clone(), value)
            })
            .collect();
        records.push(record);
    }

    Ok(records)
}

/// Parse a JSON array of flat objects into records.
fn load_json(bytes: &[u8]) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_slice(bytes)?;
    Ok(records)
}

/// Detect the delimiter by analyzing the first few lines.
///
/// The winning delimiter is the one with a consistent nonzero count
/// across lines; tab gets a slight bonus since it rarely appears inside
/// actual values.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AssayError::EmptyData("no lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| line.bytes().filter(|&b| b == delim).count())
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}
