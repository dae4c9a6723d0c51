use std::fmt::Write as _;

use crate::history::{AsymmetryLevel, AthleteHistory};
use crate::types::{LegSource, PerformanceMetrics};

fn opt(v: Option<f64>, unit: &str) -> String {
    match v {
        Some(x) => format!("{x:.1} {unit}"),
        None => "n/a".to_string(),
    }
}

/// Plain-text report for one record.
pub fn format_metrics_report(m: &PerformanceMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Force Plate Report ---");
    let _ = writeln!(out, "Athlete: {} ({:?}, {})", m.athlete_id, m.session_type, m.session_date);
    let _ = writeln!(out, "Samples: {}", m.force_time_series.len());
    let _ = writeln!(out, "Jump height: {:.1} cm", m.jump_height_cm);
    let _ = writeln!(out, "Peak force: {:.0} N", m.peak_force_n);
    let _ = writeln!(out, "RFD: {:.0} N/s", m.rfd_n_per_s);
    let _ = writeln!(out, "Impulse (net): {:.1} N·s", m.impulse_ns);
    let _ = writeln!(out, "Flight time: {:.0} ms", m.flight_time_ms);
    let _ = writeln!(out, "Contact time: {:.0} ms", m.contact_time_ms);
    let _ = writeln!(out, "RSI modified: {:.2}", m.rsi_modified);
    match m.leg_source {
        LegSource::Unavailable => {
            let _ = writeln!(out, "Left/Right: n/a (no per-limb data)");
        }
        src => {
            let _ = writeln!(
                out,
                "Left/Right: {} / {} ({:?})",
                opt(m.left_leg_force_n, "N"),
                opt(m.right_leg_force_n, "N"),
                src
            );
        }
    }
    if let Some(a) = m.asymmetry_index_pct {
        let _ = writeln!(out, "Asymmetry: {:.1} % ({:?})", a, AsymmetryLevel::classify(a));
    }
    if !m.flags.is_empty() {
        let _ = writeln!(out, "Flags: {:?}", m.flags);
    }
    out
}

/// Short trend summary, empty until there are two records.
pub fn format_history_summary(h: &AthleteHistory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Jumps analyzed: {}", h.len());
    if let Some(best) = h.best() {
        let _ = writeln!(
            out,
            "Best jump height: {:.1} cm ({})",
            best.jump_height_cm, best.session_date
        );
    }
    if let Some(t) = h.trend() {
        let _ = writeln!(
            out,
            "Trend vs previous: {:+.1} cm, {:+.0} N, {:+.0} N/s",
            t.jump_height_cm, t.peak_force_n, t.rfd_n_per_s
        );
    }
    out
}

pub fn print_metrics_report(m: &PerformanceMetrics) {
    print!("{}", format_metrics_report(m));
}
