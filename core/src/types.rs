use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One CSV row: column name → raw string value.
pub type RawRow = HashMap<String, String>;

/// Sentinel athlete id when no profile is supplied.
pub const UNKNOWN_ATHLETE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Sample {
    pub time_ms: f64, // ms from start of capture
    pub force_n: f64, // vertical force, N
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_n: Option<f64>, // left plate, N (dual-plate exports only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_n: Option<f64>, // right plate, N
}

impl Sample {
    pub fn new(time_ms: f64, force_n: f64) -> Self {
        Self { time_ms, force_n, left_n: None, right_n: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AthleteProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default, alias = "weight", alias = "weight_kg")]
    pub body_weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionType {
    #[default]
    Jump,
    Isometric,
    Landing,
}

impl std::str::FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jump" => Ok(SessionType::Jump),
            "isometric" => Ok(SessionType::Isometric),
            "landing" => Ok(SessionType::Landing),
            other => Err(format!("unknown session type: {other}")),
        }
    }
}

/// Where the left/right split of peak force came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegSource {
    Measured,
    ConfiguredSplit,
    Unavailable,
}

/// Marks a value in the record that was replaced by its documented default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFlag {
    /// No onset, zero/negative rise time or non-finite slope; rfd is 0.
    RfdUndefined,
    /// No sample under the take-off threshold after peak; contact time is the fallback.
    TakeOffNotDetected,
    /// Net impulse ≤ 0; jump height, flight time and RSI are 0.
    NoFlight,
    /// No per-limb channels and no configured split.
    AsymmetryUnavailable,
    /// Missing profile or body weight; default body weight used.
    BodyWeightDefaulted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub id: String,
    pub athlete_id: String,
    pub session_date: NaiveDate,
    #[serde(default)]
    pub session_type: SessionType,
    pub jump_height_cm: f64,
    pub peak_force_n: f64,
    pub rfd_n_per_s: f64,
    pub impulse_ns: f64, // net (baseline subtracted)
    pub raw_impulse_ns: f64, // ∫F dt
    pub asymmetry_index_pct: Option<f64>,
    pub flight_time_ms: f64,
    pub contact_time_ms: f64,
    pub rsi_modified: f64,
    pub force_time_series: Vec<Sample>,
    pub left_leg_force_n: Option<f64>,
    pub right_leg_force_n: Option<f64>,
    pub leg_source: LegSource,
    #[serde(default)]
    pub flags: Vec<MetricFlag>,
}

impl PerformanceMetrics {
    pub fn has_flag(&self, flag: MetricFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// A test session: several records captured on the same day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub athlete_id: String,
    pub date: NaiveDate,
    pub session_type: SessionType,
    pub metrics: Vec<PerformanceMetrics>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub fatigue: Option<u8>, // 1–10
}

impl Session {
    pub fn new(
        id: impl Into<String>,
        athlete_id: impl Into<String>,
        date: NaiveDate,
        session_type: SessionType,
    ) -> Self {
        Self {
            id: id.into(),
            athlete_id: athlete_id.into(),
            date,
            session_type,
            metrics: Vec::new(),
            notes: None,
            fatigue: None,
        }
    }

    /// Fatigue is a 1–10 rating; anything else is dropped.
    pub fn with_fatigue(mut self, fatigue: u8) -> Self {
        self.fatigue = if (1..=10).contains(&fatigue) { Some(fatigue) } else { None };
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Adds a record if it belongs to this session's athlete.
    pub fn push(&mut self, metrics: PerformanceMetrics) -> bool {
        if metrics.athlete_id != self.athlete_id {
            return false;
        }
        self.metrics.push(metrics);
        true
    }
}
