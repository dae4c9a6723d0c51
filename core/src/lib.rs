pub mod analyze_upload;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod ingest;
pub mod metrics;
pub mod physics;
pub mod storage;
pub mod telemetry;
pub mod types;

#[cfg(feature = "python")]
mod py;

use serde_json::json;
use serde_path_to_error as spte;

pub use analyze_upload::{analyze_upload, UploadInputs, UploadReport};
pub use config::{parse_cfg, DegeneratePolicy, ExtractorCfg};
pub use error::UploadError;
pub use history::{AsymmetryLevel, AthleteHistory};
pub use ingest::{parse_csv, parse_csv_str, rows_to_samples, IngestReport, IngestWarning};
pub use metrics::{ExtractContext, MetricsExtractor};
pub use storage::{load_history, load_profile, save_history, save_profile};
pub use types::{
    AthleteProfile, LegSource, MetricFlag, PerformanceMetrics, RawRow, Sample, Session, SessionType,
};

fn parse_profile(json: &str) -> Result<AthleteProfile, UploadError> {
    let mut de = serde_json::Deserializer::from_str(json);
    spte::deserialize(&mut de)
        .map_err(|e| UploadError::Profile(format!("profile parse at {}: {}", e.path(), e.inner())))
}

/// JSON in/out entry point for bindings:
/// `csv_text` + optional athlete/cfg JSON → `{"ok": true, "metrics": {...}, "warnings": [...]}`.
/// Processing failures come back as `{"ok": false, "error": <kind>, "message": ...}`;
/// only malformed athlete/cfg JSON is an `Err`.
pub fn process_upload_json(
    csv_text: &str,
    athlete_json: Option<&str>,
    cfg_json: Option<&str>,
) -> Result<String, UploadError> {
    let cfg = match cfg_json {
        Some(s) => parse_cfg(s)?,
        None => ExtractorCfg::default(),
    };
    let athlete = athlete_json.map(parse_profile).transpose()?;

    let out = match analyze_upload(UploadInputs {
        csv_text,
        athlete: athlete.as_ref(),
        session_type: SessionType::default(),
        captured_at: None,
        cfg: &cfg,
    }) {
        Ok(report) => json!({
            "ok": true,
            "metrics": report.metrics,
            "warnings": report.warnings,
        }),
        Err(e) => json!({
            "ok": false,
            "error": e.kind(),
            "message": e.to_string(),
        }),
    };
    Ok(out.to_string())
}
