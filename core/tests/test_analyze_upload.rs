// core/tests/test_analyze_upload.rs

use chrono::{TimeZone, Utc};

use forceplate_core::telemetry;
use forceplate_core::{
    analyze_upload, AthleteProfile, ExtractorCfg, IngestWarning, MetricFlag, SessionType,
    UploadError, UploadInputs,
};

fn inputs<'a>(
    csv_text: &'a str,
    athlete: Option<&'a AthleteProfile>,
    cfg: &'a ExtractorCfg,
) -> UploadInputs<'a> {
    UploadInputs {
        csv_text,
        athlete,
        session_type: SessionType::Jump,
        captured_at: Some(Utc.with_ymd_and_hms(2024, 1, 20, 9, 0, 0).unwrap()),
        cfg,
    }
}

#[test]
fn four_row_jump_end_to_end() {
    let csv = "time,force\n0,800\n500,500\n1000,2450\n1200,0\n";
    let athlete =
        AthleteProfile { id: "athlete-1".into(), body_weight_kg: Some(75.0), ..Default::default() };
    let cfg = ExtractorCfg::default();

    let report = analyze_upload(inputs(csv, Some(&athlete), &cfg)).unwrap();
    let m = &report.metrics;

    assert_eq!(m.peak_force_n, 2450.0);
    // onset (first > 880 N) is the 1000 ms row, which is also the peak → rise time 0
    assert!(m.rfd_n_per_s.is_finite());
    assert_eq!(m.rfd_n_per_s, 0.0);
    assert!(m.has_flag(MetricFlag::RfdUndefined));

    // raw = 325 + 737.5 + 245; net = raw - 800 * 1.2
    assert!((m.raw_impulse_ns - 1307.5).abs() < 1e-9);
    assert!((m.impulse_ns - 347.5).abs() < 1e-9);
    assert!(m.jump_height_cm >= 0.0);
    let v: f64 = 347.5 / 75.0;
    assert!((m.jump_height_cm - v * v / (2.0 * 9.81) * 100.0).abs() < 1e-9);

    assert_eq!(m.contact_time_ms, 1200.0);
    assert!(m.flight_time_ms > 0.0);
    assert!((m.rsi_modified - m.contact_time_ms / m.flight_time_ms).abs() < 1e-12);
    assert_eq!(m.athlete_id, "athlete-1");
    assert_eq!(m.force_time_series.len(), 4);
    assert!(report.warnings.is_empty());
}

#[test]
fn vertical_force_and_missing_time() {
    let csv = "vertical_force\n900\n1000\n1100\n";
    let cfg = ExtractorCfg::default();
    let report = analyze_upload(inputs(csv, None, &cfg)).unwrap();
    let s = &report.metrics.force_time_series;
    assert_eq!(s.iter().map(|x| x.force_n).collect::<Vec<_>>(), vec![900.0, 1000.0, 1100.0]);
    assert_eq!(s.iter().map(|x| x.time_ms).collect::<Vec<_>>(), vec![0.0, 5.0, 10.0]);
    assert_eq!(report.metrics.athlete_id, "unknown");
}

#[test]
fn bad_values_become_zero_with_warnings() {
    let csv = "Time,Force\n0,800\nabc,1200\n10,oops\n";
    let cfg = ExtractorCfg::default();
    let report = analyze_upload(inputs(csv, None, &cfg)).unwrap();
    let s = &report.metrics.force_time_series;
    assert_eq!(s[1].time_ms, 0.0);
    assert_eq!(s[2].force_n, 0.0);
    assert_eq!(report.warnings.len(), 2);
    assert!(matches!(
        &report.warnings[0],
        IngestWarning::NonNumeric { row: 1, column, .. } if column == "Time"
    ));
}

#[test]
fn ragged_file_is_a_parse_failure() {
    let before = telemetry::uploads_with_outcome("parse_failure");
    let csv = "time,force\n0,800\n5,900,17\n";
    let cfg = ExtractorCfg::default();
    let err = analyze_upload(inputs(csv, None, &cfg)).unwrap_err();
    assert!(matches!(err, UploadError::Parse(_)), "{err:?}");
    assert!(telemetry::uploads_with_outcome("parse_failure") > before);
}

#[test]
fn header_only_is_empty_input() {
    let cfg = ExtractorCfg::default();
    for csv in ["time,force\n", "", "time,force\n\n\n"] {
        let err = analyze_upload(inputs(csv, None, &cfg)).unwrap_err();
        assert!(matches!(err, UploadError::EmptyInput), "{csv:?}: {err:?}");
    }
}

#[test]
fn semicolon_delimiter_from_config() {
    let cfg = ExtractorCfg { delimiter: ';', ..Default::default() };
    let report = analyze_upload(inputs("time;force\n0;800\n5;1800\n10;0\n", None, &cfg)).unwrap();
    assert_eq!(report.metrics.peak_force_n, 1800.0);
}

#[test]
fn invalid_config_rejected_before_parsing() {
    let cfg = ExtractorCfg { baseline_force_n: -1.0, ..Default::default() };
    let err = analyze_upload(inputs("time,force\n0,800\n", None, &cfg)).unwrap_err();
    assert!(matches!(err, UploadError::Config(_)));
}

#[test]
fn no_force_column_is_reported() {
    let cfg = ExtractorCfg::default();
    let report = analyze_upload(inputs("time,load\n0,800\n5,900\n", None, &cfg)).unwrap();
    assert!(report.warnings.contains(&IngestWarning::NoForceColumn));
    assert_eq!(report.metrics.peak_force_n, 0.0);
}
