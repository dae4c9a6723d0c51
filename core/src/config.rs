use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_path_to_error as spte;

use crate::error::UploadError;
use crate::ingest::DEFAULT_SAMPLE_INTERVAL_MS;

/// Allowed range for a configured left-leg share of peak force.
pub const LEFT_SPLIT_RANGE: std::ops::RangeInclusive<f64> = 0.45..=0.53;

/// What to do when RFD cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// rfd = 0 and the record is flagged `RfdUndefined`.
    #[default]
    Flag,
    /// Abort extraction with `UploadError::DegenerateSignal`.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorCfg {
    #[serde(alias = "baseline_force_N")]
    pub baseline_force_n: f64, // static bodyweight-on-plate reading, N
    pub onset_factor: f64, // onset when force > baseline * factor
    #[serde(alias = "takeoff_threshold_N")]
    pub takeoff_threshold_n: f64, // airborne below this, N
    pub fallback_contact_time_ms: f64,
    pub sample_interval_ms: f64, // used when the export has no time column
    pub default_body_weight_kg: f64,
    pub left_split_fraction: Option<f64>,
    pub degenerate_policy: DegeneratePolicy,
    pub delimiter: char,
}

impl Default for ExtractorCfg {
    fn default() -> Self {
        Self {
            baseline_force_n: 800.0,
            onset_factor: 1.1,
            takeoff_threshold_n: 50.0,
            fallback_contact_time_ms: 500.0,
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            default_body_weight_kg: 75.0,
            left_split_fraction: None,
            degenerate_policy: DegeneratePolicy::Flag,
            delimiter: ',',
        }
    }
}

impl ExtractorCfg {
    pub fn onset_threshold_n(&self) -> f64 {
        self.baseline_force_n * self.onset_factor
    }

    pub fn validate(&self) -> Result<(), UploadError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(UploadError::Config(format!("{name} must be a positive number, got {v}")))
            }
        };
        positive("baseline_force_n", self.baseline_force_n)?;
        positive("sample_interval_ms", self.sample_interval_ms)?;
        positive("default_body_weight_kg", self.default_body_weight_kg)?;

        if !(self.onset_factor.is_finite() && self.onset_factor >= 1.0) {
            return Err(UploadError::Config(format!(
                "onset_factor must be >= 1.0, got {}",
                self.onset_factor
            )));
        }
        for (name, v) in [
            ("takeoff_threshold_n", self.takeoff_threshold_n),
            ("fallback_contact_time_ms", self.fallback_contact_time_ms),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(UploadError::Config(format!("{name} must be >= 0, got {v}")));
            }
        }
        if let Some(f) = self.left_split_fraction {
            if !LEFT_SPLIT_RANGE.contains(&f) {
                return Err(UploadError::Config(format!(
                    "left_split_fraction must be within {}..={}, got {f}",
                    LEFT_SPLIT_RANGE.start(),
                    LEFT_SPLIT_RANGE.end()
                )));
            }
        }
        if !self.delimiter.is_ascii() {
            return Err(UploadError::Config(format!(
                "delimiter must be a single ascii character, got {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ascii
        self.delimiter as u8
    }
}

/// Parses and validates a JSON config. Missing fields keep their defaults.
pub fn parse_cfg(json: &str) -> Result<ExtractorCfg, UploadError> {
    let mut de = serde_json::Deserializer::from_str(json);
    let cfg: ExtractorCfg = spte::deserialize(&mut de)
        .map_err(|e| UploadError::Config(format!("cfg parse at {}: {}", e.path(), e.inner())))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_cfg(path: impl AsRef<Path>) -> Result<ExtractorCfg, UploadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| UploadError::Config(format!("cannot read {}: {e}", path.display())))?;
    parse_cfg(&contents)
}
