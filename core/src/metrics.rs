use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use ordered_float::OrderedFloat;

use crate::config::{DegeneratePolicy, ExtractorCfg};
use crate::error::UploadError;
use crate::physics::{
    duration_s, finite_or_zero, flight_time_ms, jump_height_cm, takeoff_velocity, trapezoid_impulse,
    MS_PER_S,
};
use crate::types::{
    AthleteProfile, LegSource, MetricFlag, PerformanceMetrics, Sample, SessionType, UNKNOWN_ATHLETE,
};

/// Peak force and the first index that reaches it.
pub fn peak_force(samples: &[Sample]) -> Option<(usize, f64)> {
    // min_by_key keeps the first of equal keys → first occurrence of the max
    samples
        .iter()
        .enumerate()
        .min_by_key(|(_, s)| Reverse(OrderedFloat(s.force_n)))
        .map(|(i, s)| (i, s.force_n))
}

/// First index where force rises above `threshold_n`.
pub fn find_onset(samples: &[Sample], threshold_n: f64) -> Option<usize> {
    samples.iter().position(|s| s.force_n > threshold_n)
}

/// First index after `peak_index` where force drops below `threshold_n`.
pub fn find_takeoff(samples: &[Sample], peak_index: usize, threshold_n: f64) -> Option<usize> {
    samples
        .iter()
        .enumerate()
        .skip(peak_index + 1)
        .find(|(_, s)| s.force_n < threshold_n)
        .map(|(i, _)| i)
}

/// RFD = (peak − baseline) / rise time, N/s.
/// Err carries the reason RFD is undefined.
pub fn rate_of_force_development(
    samples: &[Sample],
    onset_index: Option<usize>,
    peak_index: usize,
    baseline_n: f64,
) -> Result<f64, String> {
    let onset = onset_index.ok_or_else(|| "no sample exceeds the onset threshold".to_string())?;
    let (Some(o), Some(p)) = (samples.get(onset), samples.get(peak_index)) else {
        return Err(format!("onset {onset} / peak {peak_index} out of range"));
    };
    let rise_s = (p.time_ms - o.time_ms) / MS_PER_S;
    if rise_s <= 0.0 {
        return Err(format!("rise time from onset to peak is {:.1} ms", rise_s * MS_PER_S));
    }
    let rfd = (p.force_n - baseline_n) / rise_s;
    if rfd.is_finite() {
        Ok(rfd)
    } else {
        Err("rfd is not finite".to_string())
    }
}

/// Asymmetry index = |L − R| / peak * 100 (%).
pub fn asymmetry_index(left_n: f64, right_n: f64, peak_n: f64) -> f64 {
    if peak_n <= 0.0 {
        return 0.0;
    }
    finite_or_zero((left_n - right_n).abs() / peak_n * 100.0)
}

/// RSI modified = contact / flight; 0 without flight.
pub fn rsi_modified(contact_time_ms: f64, flight_time_ms: f64) -> f64 {
    if flight_time_ms > 0.0 {
        finite_or_zero(contact_time_ms / flight_time_ms)
    } else {
        0.0
    }
}

/// First sample field that is NaN or infinite.
pub fn first_non_finite(samples: &[Sample]) -> Option<(usize, &'static str)> {
    samples.iter().enumerate().find_map(|(i, s)| {
        let fields = [
            ("time_ms", Some(s.time_ms)),
            ("force_n", Some(s.force_n)),
            ("left_n", s.left_n),
            ("right_n", s.right_n),
        ];
        fields
            .into_iter()
            .find(|(_, v)| v.is_some_and(|x| !x.is_finite()))
            .map(|(field, _)| (i, field))
    })
}

/// Per-limb force at peak: measured channels when every sample has both,
/// otherwise the configured split, otherwise nothing.
fn leg_split(
    samples: &[Sample],
    peak_index: usize,
    peak_n: f64,
    cfg: &ExtractorCfg,
) -> (LegSource, Option<(f64, f64)>) {
    let measured = samples.iter().all(|s| s.left_n.is_some() && s.right_n.is_some());
    if measured {
        if let Some(Sample { left_n: Some(l), right_n: Some(r), .. }) = samples.get(peak_index) {
            return (LegSource::Measured, Some((*l, *r)));
        }
    }
    match cfg.left_split_fraction {
        Some(f) => {
            let left = peak_n * f;
            (LegSource::ConfiguredSplit, Some((left, peak_n - left)))
        }
        None => (LegSource::Unavailable, None),
    }
}

/// Turns a sample series into a `PerformanceMetrics` record.
/// Stateless apart from its config; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct MetricsExtractor {
    cfg: ExtractorCfg,
}

/// Caller-supplied context for a record: who, what and when.
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    pub athlete: Option<&'a AthleteProfile>,
    pub session_type: SessionType,
    pub captured_at: DateTime<Utc>,
}

impl<'a> ExtractContext<'a> {
    pub fn now(athlete: Option<&'a AthleteProfile>) -> Self {
        Self { athlete, session_type: SessionType::default(), captured_at: Utc::now() }
    }
}

impl MetricsExtractor {
    pub fn new(cfg: ExtractorCfg) -> Result<Self, UploadError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn cfg(&self) -> &ExtractorCfg {
        &self.cfg
    }

    /// Extract with the current time as capture time.
    pub fn extract(
        &self,
        samples: &[Sample],
        athlete: Option<&AthleteProfile>,
    ) -> Result<PerformanceMetrics, UploadError> {
        self.extract_with(samples, ExtractContext::now(athlete))
    }

    /// Fails on a NaN/infinite sample field, an empty series, or (under
    /// `DegeneratePolicy::Reject`) an undefined RFD.
    pub fn extract_with(
        &self,
        samples: &[Sample],
        ctx: ExtractContext<'_>,
    ) -> Result<PerformanceMetrics, UploadError> {
        let cfg = &self.cfg;
        let mut flags = Vec::new();

        if let Some((index, field)) = first_non_finite(samples) {
            return Err(UploadError::NonFiniteSample { index, field });
        }

        // 1) peak
        let (peak_index, peak_n) = peak_force(samples).ok_or(UploadError::EmptyInput)?;

        // 2–4) baseline, onset, RFD
        let baseline_n = cfg.baseline_force_n;
        let onset_index = find_onset(samples, cfg.onset_threshold_n());
        let rfd = match rate_of_force_development(samples, onset_index, peak_index, baseline_n) {
            Ok(v) => v,
            Err(reason) => match cfg.degenerate_policy {
                DegeneratePolicy::Reject => return Err(UploadError::DegenerateSignal { reason }),
                DegeneratePolicy::Flag => {
                    warn!("rfd undefined ({reason}), reporting 0");
                    flags.push(MetricFlag::RfdUndefined);
                    0.0
                }
            },
        };
        debug!("peak={peak_n:.1} N @ {peak_index}, onset={onset_index:?}, rfd={rfd:.1} N/s");

        // 5) impulse
        let raw_impulse = finite_or_zero(trapezoid_impulse(samples));
        let net_impulse = finite_or_zero(raw_impulse - baseline_n * duration_s(samples));

        // 6) velocity + jump height
        let body_weight_kg = match ctx.athlete.and_then(|a| a.body_weight_kg) {
            Some(w) if w.is_finite() && w > 0.0 => w,
            other => {
                if other.is_some() {
                    warn!("invalid body weight {other:?}, using {} kg", cfg.default_body_weight_kg);
                }
                flags.push(MetricFlag::BodyWeightDefaulted);
                cfg.default_body_weight_kg
            }
        };
        let velocity = takeoff_velocity(net_impulse, body_weight_kg);
        let jump_height = jump_height_cm(velocity);
        if jump_height <= 0.0 {
            flags.push(MetricFlag::NoFlight);
        }

        // 7) take-off / contact time
        let start_ms = samples[0].time_ms;
        let contact_time = match find_takeoff(samples, peak_index, cfg.takeoff_threshold_n) {
            Some(i) => (samples[i].time_ms - start_ms).max(0.0),
            None => {
                flags.push(MetricFlag::TakeOffNotDetected);
                cfg.fallback_contact_time_ms
            }
        };

        // 8–9) flight time + RSI
        let flight_time = flight_time_ms(jump_height);
        let rsi = rsi_modified(contact_time, flight_time);

        // 10–11) left/right + asymmetry
        let (leg_source, legs) = leg_split(samples, peak_index, peak_n, cfg);
        let asymmetry = legs.map(|(l, r)| asymmetry_index(l, r, peak_n));
        if legs.is_none() {
            flags.push(MetricFlag::AsymmetryUnavailable);
        }

        debug!("impulse raw={raw_impulse:.1} net={net_impulse:.1} N·s, h={jump_height:.2} cm");
        debug!("contact={contact_time:.0} ms, flight={flight_time:.0} ms");

        Ok(PerformanceMetrics {
            id: format!("uploaded-{}", ctx.captured_at.timestamp_millis()),
            athlete_id: ctx
                .athlete
                .map(|a| a.id.clone())
                .unwrap_or_else(|| UNKNOWN_ATHLETE.to_string()),
            session_date: ctx.captured_at.date_naive(),
            session_type: ctx.session_type,
            jump_height_cm: jump_height,
            peak_force_n: peak_n,
            rfd_n_per_s: rfd,
            impulse_ns: net_impulse,
            raw_impulse_ns: raw_impulse,
            asymmetry_index_pct: asymmetry,
            flight_time_ms: flight_time,
            contact_time_ms: contact_time,
            rsi_modified: rsi,
            force_time_series: samples.to_vec(),
            left_leg_force_n: legs.map(|(l, _)| l),
            right_leg_force_n: legs.map(|(_, r)| r),
            leg_source,
            flags,
        })
    }
}
