use forceplate_core::{
    analyze_upload, load_history, load_profile, save_history, save_profile, AthleteProfile,
    ExtractorCfg, SessionType, UploadInputs,
};

#[test]
fn test_save_and_load_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");

    let profile = AthleteProfile {
        id: "athlete-2".to_string(),
        name: Some("Sarah Chen".to_string()),
        sport: Some("Volleyball".to_string()),
        body_weight_kg: Some(68.0),
    };

    save_profile(&profile, &path).expect("save_profile failed");
    let loaded = load_profile(&path).expect("load_profile failed");
    assert_eq!(loaded, profile);
}

#[test]
fn missing_profile_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_profile(dir.path().join("nope.json")).unwrap();
    assert_eq!(loaded.id, "unknown");
    assert_eq!(loaded.body_weight_kg, None);
}

#[test]
fn profile_accepts_weight_alias() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("p.json");
    std::fs::write(&path, r#"{"id":"athlete-3","weight":88}"#).unwrap();
    assert_eq!(load_profile(&path).unwrap().body_weight_kg, Some(88.0));
}

#[test]
fn history_round_trip_after_upload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let athlete =
        AthleteProfile { id: "athlete-1".into(), body_weight_kg: Some(82.0), ..Default::default() };
    let cfg = ExtractorCfg::default();

    let report = analyze_upload(UploadInputs {
        csv_text: "time,force\n0,800\n200,1500\n400,2400\n600,0\n",
        athlete: Some(&athlete),
        session_type: SessionType::Jump,
        captured_at: None,
        cfg: &cfg,
    })
    .unwrap();

    let mut history = load_history(&path, "athlete-1").unwrap();
    assert!(history.is_empty());
    assert!(history.push(report.metrics.clone()));
    save_history(&history, &path).unwrap();

    let loaded = load_history(&path, "athlete-1").unwrap();
    assert_eq!(loaded.len(), 1);
    let back = &loaded.records()[0];
    assert_eq!(back.id, report.metrics.id);
    assert_eq!(back.session_date, report.metrics.session_date);
    assert_eq!(back.peak_force_n, 2400.0);
    assert_eq!(back.force_time_series.len(), 4);
    assert!(load_history(&path, "athlete-9").is_err());
}
