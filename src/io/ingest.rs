//! CSV ingest.
//!
//! Turns a CSV with `x` and `y` columns into a `SampleSet`.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip unparseable rows, but report what happened)
//! - **No domain filtering**: non-positive values are kept so the fit reports them

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{info, warn};

use crate::domain::SampleSet;
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: samples + row errors.
#[derive(Debug, Clone)]
pub struct IngestedSamples {
    pub samples: SampleSet,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load `(x, y)` samples from a CSV file.
pub fn load_csv_samples(path: &Path) -> Result<IngestedSamples, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let ingested = read_csv_samples(file)?;
    info!(
        "read {} rows from {} ({} used, {} skipped)",
        ingested.rows_read,
        path.display(),
        ingested.samples.len(),
        ingested.row_errors.len()
    );
    Ok(ingested)
}

/// Parse `(x, y)` samples from any CSV reader.
pub fn read_csv_samples<R: Read>(reader: R) -> Result<IngestedSamples, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let x_idx = required_column(&header_map, "x")?;
    let y_idx = required_column(&header_map, "y")?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        rows_read += 1;

        // Fallback +2: records() starts after the header, and lines are 1-based.
        let (line, parsed) = match result {
            Ok(record) => (
                source_line(record.position(), idx + 2),
                parse_pair(&record, x_idx, y_idx),
            ),
            Err(e) => (source_line(e.position(), idx + 2), Err(format!("CSV parse error: {e}"))),
        };

        match parsed {
            Ok((xv, yv)) => {
                x.push(xv);
                y.push(yv);
            }
            Err(message) => {
                warn!("skipping CSV line {line}: {message}");
                row_errors.push(RowError { line, message });
            }
        }
    }

    if x.is_empty() {
        return Err(AppError::data("No valid rows in CSV."));
    }

    Ok(IngestedSamples {
        samples: SampleSet::new(x, y)?,
        row_errors,
        rows_read,
    })
}

/// 1-based line a record starts on; blank lines and quoted newlines shift it
/// away from the record index.
fn source_line(position: Option<&csv::Position>, fallback: usize) -> usize {
    position
        .and_then(|p| usize::try_from(p.line()).ok())
        .unwrap_or(fallback)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, the `x` column goes missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn required_column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(name)
        .copied()
        .ok_or_else(|| AppError::input(format!("Missing required column: `{name}`")))
}

fn parse_pair(record: &StringRecord, x_idx: usize, y_idx: usize) -> Result<(f64, f64), String> {
    Ok((parse_field(record, x_idx, "x")?, parse_field(record, y_idx, "y")?))
}

fn parse_field(record: &StringRecord, idx: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing `{name}`"))?;
    let v: f64 = raw
        .parse()
        .map_err(|_| format!("`{name}` is not a number: '{raw}'"))?;
    if !v.is_finite() {
        return Err(format!("`{name}` is not finite: '{raw}'"));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_x_and_y_columns() {
        let csv = "label,X,Y\na,1.0,2.0\nb,2.0,8.0\nc,4.0,32.0\n";
        let out = read_csv_samples(csv.as_bytes()).unwrap();
        assert_eq!(out.samples.x(), &[1.0, 2.0, 4.0]);
        assert_eq!(out.samples.y(), &[2.0, 8.0, 32.0]);
        assert_eq!(out.rows_read, 3);
        assert!(out.row_errors.is_empty());
    }

    #[test]
    fn strips_bom_from_first_header() {
        let csv = "\u{feff}x,y\n1,2\n3,4\n";
        let out = read_csv_samples(csv.as_bytes()).unwrap();
        assert_eq!(out.samples.len(), 2);
    }

    #[test]
    fn skips_bad_rows_and_reports_lines() {
        let csv = "x,y\n1,2\nabc,3\n4,\n5,inf\n6,7\n";
        let out = read_csv_samples(csv.as_bytes()).unwrap();
        assert_eq!(out.samples.x(), &[1.0, 6.0]);
        let lines: Vec<usize> = out.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert_eq!(out.rows_read, 5);
    }

    #[test]
    fn reported_lines_account_for_blank_lines() {
        let csv = "x,y\n1,2\n\nabc,3\n4,5\n";
        let out = read_csv_samples(csv.as_bytes()).unwrap();
        assert_eq!(out.samples.x(), &[1.0, 4.0]);
        let lines: Vec<usize> = out.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![4]);
    }

    #[test]
    fn reported_lines_account_for_multiline_records() {
        let csv = "x,y,note\n1,2,\"first\nsecond\"\nabc,3,\n4,5,\n";
        let out = read_csv_samples(csv.as_bytes()).unwrap();
        assert_eq!(out.samples.x(), &[1.0, 4.0]);
        let lines: Vec<usize> = out.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![4]);
    }

    #[test]
    fn keeps_non_positive_values_for_the_fit_to_reject() {
        let csv = "x,y\n0,2\n-1,3\n";
        let out = read_csv_samples(csv.as_bytes()).unwrap();
        assert_eq!(out.samples.x(), &[0.0, -1.0]);
    }

    #[test]
    fn missing_column_is_an_input_error() {
        let err = read_csv_samples("x,z\n1,2\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.message().contains("`y`"));
    }

    #[test]
    fn no_usable_rows_is_a_data_error() {
        let err = read_csv_samples("x,y\nfoo,bar\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);
    }
}
