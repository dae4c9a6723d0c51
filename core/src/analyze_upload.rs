use chrono::{DateTime, Utc};
use log::info;

use crate::config::ExtractorCfg;
use crate::error::UploadError;
use crate::ingest::{parse_csv_str, rows_to_samples, IngestWarning};
use crate::metrics::{ExtractContext, MetricsExtractor};
use crate::telemetry;
use crate::types::{AthleteProfile, PerformanceMetrics, SessionType};

#[derive(Clone)]
pub struct UploadInputs<'a> {
    /// Raw CSV export (header row + records)
    pub csv_text: &'a str,
    /// Selected athlete. None => "unknown" and default body weight.
    pub athlete: Option<&'a AthleteProfile>,
    pub session_type: SessionType,
    /// Capture time. None => now.
    pub captured_at: Option<DateTime<Utc>>,
    pub cfg: &'a ExtractorCfg,
}

#[derive(Debug, Clone)]
pub struct UploadReport {
    pub metrics: PerformanceMetrics,
    /// Field-level problems that were coerced to 0 during ingestion
    pub warnings: Vec<IngestWarning>,
}

/// One upload-and-process cycle: parse → normalize → extract.
/// Parse failures abort before any metric is computed.
pub fn analyze_upload(inputs: UploadInputs) -> Result<UploadReport, UploadError> {
    let result = run(&inputs);
    match &result {
        Ok(report) => telemetry::record_success(
            report.metrics.force_time_series.len(),
            report.warnings.len(),
        ),
        Err(e) => telemetry::record_failure(e),
    }
    result
}

fn run(inputs: &UploadInputs) -> Result<UploadReport, UploadError> {
    // 0️⃣ Config first, a bad delimiter would make every parse fail
    let extractor = MetricsExtractor::new(inputs.cfg.clone())?;

    // 1️⃣ Tokenize
    let rows = parse_csv_str(inputs.csv_text, inputs.cfg.delimiter_byte())?;
    if rows.is_empty() {
        return Err(UploadError::EmptyInput);
    }

    // 2️⃣ Normalize to samples
    let ingest = rows_to_samples(&rows, inputs.cfg.sample_interval_ms);

    // 3️⃣ Extract
    let ctx = ExtractContext {
        athlete: inputs.athlete,
        session_type: inputs.session_type,
        captured_at: inputs.captured_at.unwrap_or_else(Utc::now),
    };
    let metrics = extractor.extract_with(&ingest.samples, ctx)?;

    info!(
        "processed {} samples for athlete={} ({} warnings): peak={:.0} N, h={:.1} cm",
        ingest.samples.len(),
        metrics.athlete_id,
        ingest.warnings.len(),
        metrics.peak_force_n,
        metrics.jump_height_cm
    );

    Ok(UploadReport { metrics, warnings: ingest.warnings })
}
