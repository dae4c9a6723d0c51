use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::types::PerformanceMetrics;

/// Asymmetry bands: ≤5 % normal, ≤10 % moderate, above that high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsymmetryLevel {
    Normal,
    Moderate,
    High,
}

impl AsymmetryLevel {
    pub fn classify(asymmetry_pct: f64) -> Self {
        if asymmetry_pct <= 5.0 {
            AsymmetryLevel::Normal
        } else if asymmetry_pct <= 10.0 {
            AsymmetryLevel::Moderate
        } else {
            AsymmetryLevel::High
        }
    }
}

/// Value vs. benchmark rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchmarkStatus {
    Good,
    Warning,
    Poor,
    Unrated,
}

/// Higher-is-better: ≥95 % of benchmark good, ≥85 % warning.
/// Lower-is-better: ≤50 % good, ≤80 % warning. Benchmark 0 → unrated.
pub fn benchmark_status(value: f64, benchmark: f64, lower_is_better: bool) -> BenchmarkStatus {
    if benchmark == 0.0 || !benchmark.is_finite() || !value.is_finite() {
        return BenchmarkStatus::Unrated;
    }
    let ratio = value / benchmark;
    if lower_is_better {
        if ratio <= 0.5 {
            BenchmarkStatus::Good
        } else if ratio <= 0.8 {
            BenchmarkStatus::Warning
        } else {
            BenchmarkStatus::Poor
        }
    } else if ratio >= 0.95 {
        BenchmarkStatus::Good
    } else if ratio >= 0.85 {
        BenchmarkStatus::Warning
    } else {
        BenchmarkStatus::Poor
    }
}

/// Latest minus previous record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TrendInfo {
    pub jump_height_cm: f64,
    pub peak_force_n: f64,
    pub rfd_n_per_s: f64,
}

/// Append-only record collection for one athlete.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AthleteHistory {
    pub athlete_id: String,
    records: Vec<PerformanceMetrics>,
}

impl AthleteHistory {
    pub fn new(athlete_id: impl Into<String>) -> Self {
        Self { athlete_id: athlete_id.into(), records: Vec::new() }
    }

    /// Appends a record; records for another athlete are refused.
    pub fn push(&mut self, metrics: PerformanceMetrics) -> bool {
        if metrics.athlete_id != self.athlete_id {
            return false;
        }
        self.records.push(metrics);
        true
    }

    pub fn records(&self) -> &[PerformanceMetrics] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&PerformanceMetrics> {
        self.records.last()
    }

    /// Highest jump; the earliest wins a tie.
    pub fn best(&self) -> Option<&PerformanceMetrics> {
        self.records
            .iter()
            .rev()
            .max_by_key(|m| OrderedFloat(m.jump_height_cm))
    }

    /// None until there are two records.
    pub fn trend(&self) -> Option<TrendInfo> {
        let n = self.records.len();
        if n < 2 {
            return None;
        }
        let (prev, last) = (&self.records[n - 2], &self.records[n - 1]);
        Some(TrendInfo {
            jump_height_cm: last.jump_height_cm - prev.jump_height_cm,
            peak_force_n: last.peak_force_n - prev.peak_force_n,
            rfd_n_per_s: last.rfd_n_per_s - prev.rfd_n_per_s,
        })
    }

    /// Mean asymmetry over records that have one.
    pub fn average_asymmetry(&self) -> Option<(f64, AsymmetryLevel)> {
        let vals: Vec<f64> = self.records.iter().filter_map(|m| m.asymmetry_index_pct).collect();
        if vals.is_empty() {
            return None;
        }
        let avg = vals.iter().sum::<f64>() / vals.len() as f64;
        Some((avg, AsymmetryLevel::classify(avg)))
    }
}
