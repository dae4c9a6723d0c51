use forceplate_core::cli::{format_history_summary, format_metrics_report};
use forceplate_core::{AthleteHistory, ExtractorCfg, MetricsExtractor, Sample};

fn jump() -> Vec<Sample> {
    let mut s: Vec<Sample> = [(0.0, 800.0), (200.0, 1500.0), (400.0, 2400.0), (600.0, 0.0)]
        .iter()
        .map(|&(t, f)| Sample::new(t, f))
        .collect();
    for x in s.iter_mut() {
        x.left_n = Some(x.force_n * 0.5);
        x.right_n = Some(x.force_n * 0.5);
    }
    s
}

#[test]
fn report_lists_core_metrics() {
    let m = MetricsExtractor::default().extract(&jump(), None).unwrap();
    let txt = format_metrics_report(&m);
    assert!(txt.contains("Peak force: 2400 N"), "{txt}");
    assert!(txt.contains("RFD:"));
    assert!(txt.contains("Asymmetry: 0.0 % (Normal)"), "{txt}");
}

#[test]
fn report_marks_missing_limb_data() {
    let cfg = ExtractorCfg::default();
    let s: Vec<Sample> = jump().into_iter().map(|x| Sample::new(x.time_ms, x.force_n)).collect();
    let m = MetricsExtractor::new(cfg).unwrap().extract(&s, None).unwrap();
    assert!(format_metrics_report(&m).contains("Left/Right: n/a"));
}

#[test]
fn history_summary_shows_trend() {
    let ex = MetricsExtractor::default();
    let mut h = AthleteHistory::new("unknown");
    h.push(ex.extract(&jump(), None).unwrap());
    assert!(!format_history_summary(&h).contains("Trend"));
    h.push(ex.extract(&jump(), None).unwrap());
    let txt = format_history_summary(&h);
    assert!(txt.contains("Jumps analyzed: 2"));
    assert!(txt.contains("Trend vs previous: +0.0 cm"), "{txt}");
}

#[test]
fn report_shows_configured_split() {
    let cfg = ExtractorCfg { left_split_fraction: Some(0.5), ..Default::default() };
    let s: Vec<Sample> = jump().into_iter().map(|x| Sample::new(x.time_ms, x.force_n)).collect();
    let m = MetricsExtractor::new(cfg).unwrap().extract(&s, None).unwrap();
    let txt = format_metrics_report(&m);
    assert!(txt.contains("Left/Right: 1200.0 N / 1200.0 N (ConfiguredSplit)"), "{txt}");
}
