use forceplate_core::physics::{
    duration_s, flight_time_ms, jump_height_cm, takeoff_velocity, trapezoid_impulse, RoundTo,
};
use forceplate_core::Sample;

#[test]
fn test_impulse_constant_force() {
    // 1000 N for 0.5 s
    let samples: Vec<Sample> = (0..=100).map(|i| Sample::new(i as f64 * 5.0, 1000.0)).collect();
    assert!((trapezoid_impulse(&samples) - 500.0).abs() < 1e-9);
    assert!((duration_s(&samples) - 0.5).abs() < 1e-12);
}

#[test]
fn test_velocity_from_net_impulse() {
    assert!((takeoff_velocity(150.0, 75.0) - 2.0).abs() < 1e-12);
    assert_eq!(takeoff_velocity(-150.0, 75.0), 0.0);
    assert_eq!(takeoff_velocity(150.0, 0.0), 0.0);
}

#[test]
fn test_jump_height_and_flight_time() {
    // 2 m/s → 20.39 cm, 407.7 ms airborne
    let h = jump_height_cm(2.0);
    assert_eq!(h.round_to(2), 20.39);
    assert_eq!(flight_time_ms(h).round_to(1), 407.7);
    assert_eq!(flight_time_ms(0.0), 0.0);
    assert_eq!(flight_time_ms(-3.0), 0.0);
}

#[test]
fn test_round_to() {
    assert_eq!(1.23456_f64.round_to(2), 1.23);
    assert_eq!(2.5_f64.round_to(0), 3.0);
}
