use super::*;

#[test]
fn empty_object_takes_defaults() {
    let cfg = RunConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, RunConfig::default());
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_file_overrides_selected_fields() {
    let json = r#"{
        "width": 320,
        "height": 240,
        "pattern": "wave_interference",
        "color_mode": "rainbow_hsv",
        "randomness": "chaotic_attractor",
        "fill": "outline",
        "workers": 8,
        "assembly": "scratch",
        "encoder": { "preset": "fast", "tune": "animation" }
    }"#;
    let cfg = RunConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.pattern, PatternKind::WaveInterference);
    assert_eq!(cfg.color_mode, ColorMode::RainbowHsv);
    assert_eq!(cfg.randomness, RandomnessMode::ChaoticAttractor);
    assert_eq!(cfg.fill, TileFill::Outline);
    assert_eq!(cfg.assembly, AssemblyStrategy::Scratch);
    assert_eq!(cfg.encoder.bitrate_kbps, 8000);

    let params = cfg.encode_params().unwrap();
    assert_eq!(params.preset, "fast");
    assert_eq!(params.tune.as_deref(), Some("animation"));
    assert_eq!(params.target_frames, Some(150));
    assert_eq!(cfg.pipeline_config().workers, 8);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = RunConfig::from_reader(r#"{ "widht": 10 }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, TileforgeError::Serde(_)));
    assert!(RunConfig::from_reader(r#"{ "encoder": { "crf": 20 } }"#.as_bytes()).is_err());
}

#[test]
fn json_round_trip() {
    let mut cfg = RunConfig::default();
    cfg.pattern = PatternKind::Kaleidoscope;
    cfg.reseed_each_frame = true;
    let json = cfg.to_json_pretty().unwrap();
    assert_eq!(RunConfig::from_reader(json.as_bytes()).unwrap(), cfg);
}

#[test]
fn validate_catches_bad_values() {
    let edits: [fn(&mut RunConfig); 5] = [
        |c| c.tile_size = 0,
        |c| c.workers = 0,
        |c| c.fps = 0,
        |c| c.encoder.bitrate_kbps = 0,
        |c| c.time_step = f32::NAN,
    ];
    for edit in edits {
        let mut cfg = RunConfig::default();
        edit(&mut cfg);
        assert!(cfg.validate().is_err());
    }
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = RunConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn schedule_mirrors_file() {
    let cfg = RunConfig {
        seed: 9,
        frames: 3,
        time_step: 0.1,
        ..RunConfig::default()
    };
    let s = cfg.schedule();
    assert_eq!((s.seed, s.frames, s.time_step), (9, 3, 0.1));
}
