//! Signal ingestion: CSV text → `RawRow`s → ordered `Sample`s.
//!
//! Parsing is fail-soft at the field level (a bad value becomes 0 and a
//! warning) and fail-fast at the file level (a file the tokenizer rejects
//! aborts the upload).

use std::io::Read;

use log::{debug, warn};
use serde::Serialize;

use crate::error::UploadError;
use crate::types::{RawRow, Sample};

/// Column aliases, first present wins.
pub const TIME_COLUMNS: &[&str] = &["time", "Time"];
pub const FORCE_COLUMNS: &[&str] = &["force", "Force", "vertical_force"];
pub const LEFT_COLUMNS: &[&str] = &["left_force", "Left", "left"];
pub const RIGHT_COLUMNS: &[&str] = &["right_force", "Right", "right"];

pub const DEFAULT_SAMPLE_INTERVAL_MS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngestWarning {
    /// A value that did not parse as a finite number; replaced by 0.
    NonNumeric { row: usize, column: String, value: String },
    /// Time went backwards relative to the previous row. Kept as-is.
    NonMonotonicTime { row: usize, time_ms: f64, prev_ms: f64 },
    /// None of the rows carried a recognized force column.
    NoForceColumn,
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub samples: Vec<Sample>,
    pub warnings: Vec<IngestWarning>,
}

/// Tokenize delimiter-separated text with a header row into raw rows.
/// Empty lines are skipped; ragged rows are a parse failure.
pub fn parse_csv<R: Read>(reader: R, delimiter: u8) -> Result<Vec<RawRow>, UploadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    debug!("parse_csv: {} columns, {} rows", headers.len(), rows.len());
    Ok(rows)
}

pub fn parse_csv_str(text: &str, delimiter: u8) -> Result<Vec<RawRow>, UploadError> {
    parse_csv(text.as_bytes(), delimiter)
}

/// First alias present with a non-empty value, with the column it came from.
fn lookup<'a>(
    row: &'a RawRow,
    aliases: &'static [&'static str],
) -> Option<(&'static str, &'a str)> {
    aliases.iter().find_map(|&key| {
        row.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| (key, v))
    })
}

/// Finite f64 or 0 plus a warning.
fn parse_num(row_idx: usize, column: &str, raw: &str, warnings: &mut Vec<IngestWarning>) -> f64 {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            warn!("row {row_idx}: non-numeric {column}={raw:?}, using 0");
            warnings.push(IngestWarning::NonNumeric {
                row: row_idx,
                column: column.to_string(),
                value: raw.to_string(),
            });
            0.0
        }
    }
}

/// Normalize raw rows into samples. Ordering is preserved; missing time
/// becomes `index * interval_ms`, missing force becomes 0.
pub fn rows_to_samples(rows: &[RawRow], interval_ms: f64) -> IngestReport {
    let mut warnings = Vec::new();
    let mut samples = Vec::with_capacity(rows.len());
    let mut saw_force = false;

    for (i, row) in rows.iter().enumerate() {
        let time_ms = match lookup(row, TIME_COLUMNS) {
            Some((col, raw)) => parse_num(i, col, raw, &mut warnings),
            None => i as f64 * interval_ms,
        };
        let force_n = match lookup(row, FORCE_COLUMNS) {
            Some((col, raw)) => {
                saw_force = true;
                parse_num(i, col, raw, &mut warnings)
            }
            None => 0.0,
        };
        let left_n =
            lookup(row, LEFT_COLUMNS).map(|(col, raw)| parse_num(i, col, raw, &mut warnings));
        let right_n =
            lookup(row, RIGHT_COLUMNS).map(|(col, raw)| parse_num(i, col, raw, &mut warnings));

        if let Some(prev) = samples.last().map(|s: &Sample| s.time_ms) {
            if time_ms < prev {
                warn!("row {i}: time {time_ms} ms before previous {prev} ms");
                warnings.push(IngestWarning::NonMonotonicTime { row: i, time_ms, prev_ms: prev });
            }
        }

        samples.push(Sample { time_ms, force_n, left_n, right_n });
    }

    if !rows.is_empty() && !saw_force {
        warn!("no recognized force column ({FORCE_COLUMNS:?}), all forces are 0");
        warnings.push(IngestWarning::NoForceColumn);
    }

    IngestReport { samples, warnings }
}
