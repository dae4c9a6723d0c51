// core/src/physics.rs
use crate::types::Sample;

pub const G: f64 = 9.81; // gravity (m/s²)
pub const G_CM: f64 = 981.0; // gravity (cm/s²), same value in cm
pub const MS_PER_S: f64 = 1000.0;

// --- RoundTo trait (public) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Finite or zero. Keeps NaN/∞ out of every record.
#[inline]
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Trapezoidal ∫F dt over the whole series, N·s.
/// Adjacent pairs contribute avg_force * dt_s; a single sample has no area.
pub fn trapezoid_impulse(samples: &[Sample]) -> f64 {
    samples
        .windows(2)
        .map(|w| {
            let dt_s = (w[1].time_ms - w[0].time_ms) / MS_PER_S;
            0.5 * (w[0].force_n + w[1].force_n) * dt_s
        })
        .sum()
}

/// Capture window in seconds (last minus first timestamp).
pub fn duration_s(samples: &[Sample]) -> f64 {
    match (samples.first(), samples.last()) {
        (Some(a), Some(b)) => (b.time_ms - a.time_ms) / MS_PER_S,
        _ => 0.0,
    }
}

/// Take-off velocity from impulse-momentum, m/s. Negative net impulse means no launch.
#[inline]
pub fn takeoff_velocity(net_impulse_ns: f64, body_weight_kg: f64) -> f64 {
    if body_weight_kg <= 0.0 {
        return 0.0;
    }
    finite_or_zero(net_impulse_ns.max(0.0) / body_weight_kg)
}

/// h = v² / 2g, in cm. Never negative.
#[inline]
pub fn jump_height_cm(velocity_ms: f64) -> f64 {
    finite_or_zero((velocity_ms * velocity_ms) / (2.0 * G) * 100.0).max(0.0)
}

/// Projectile flight time for a given jump height: t = sqrt(8h/g), ms.
#[inline]
pub fn flight_time_ms(jump_height_cm: f64) -> f64 {
    if jump_height_cm <= 0.0 {
        return 0.0;
    }
    finite_or_zero((8.0 * jump_height_cm / G_CM).sqrt() * MS_PER_S)
}
