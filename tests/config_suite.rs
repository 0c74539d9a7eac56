use chaos_equations::config::{Config, DotSize, TrailPreset};
use clap::Parser;

fn parse(args: &[&str]) -> Config {
    let mut argv = vec!["chaos-equations"];
    argv.extend_from_slice(args);
    Config::try_parse_from(argv).expect("args should parse")
}

#[test]
fn defaults_match_reference_settings() {
    let cfg = parse(&[]);
    assert_eq!((cfg.width, cfg.height), (1600, 900));
    assert!(!cfg.fullscreen);
    assert_eq!(cfg.iterations, 800);
    assert_eq!(cfg.steps_per_frame, 500);
    assert_eq!(cfg.delta_per_step, 1e-5);
    assert_eq!(cfg.delta_minimum, 1e-7);
    assert_eq!((cfg.t_start, cfg.t_end), (-3.0, 3.0));
    assert_eq!(cfg.trail, TrailPreset::Fast);
    assert_eq!(cfg.dot, DotSize::Small);
    assert_eq!(cfg.save_file, std::path::PathBuf::from("saved.txt"));
    assert!(cfg.code.is_none());
    assert!(cfg.vsync);
    cfg.validate().expect("defaults are valid");
    assert_eq!(cfg.sample_count(), 400_000);
}

#[test]
fn negative_bounds_parse() {
    let cfg = parse(&["--t-start", "-5.5", "--t-end", "-1"]);
    assert_eq!(cfg.t_start, -5.5);
    assert_eq!(cfg.t_end, -1.0);
    cfg.validate().expect("ordered bounds are valid");

    let s = cfg.stepper_settings();
    assert_eq!(s.t_start, -5.5);
    assert_eq!(s.t_end, -1.0);
    assert_eq!(s.iterations, cfg.iterations);
    assert_eq!(s.steps_per_frame, cfg.steps_per_frame);
}

#[test]
fn enums_and_flags_parse() {
    let cfg = parse(&[
        "--trail", "instant", "--dot", "large", "--vsync", "false", "--code", "abcdef", "--seed", "9",
        "--fullscreen",
    ]);
    assert_eq!(cfg.trail, TrailPreset::Instant);
    assert_eq!(cfg.dot, DotSize::Large);
    assert!(!cfg.vsync);
    assert!(cfg.fullscreen);
    assert_eq!(cfg.code.as_deref(), Some("abcdef"));
    assert_eq!(cfg.seed, Some(9));
}

#[test]
fn unknown_trail_is_rejected() {
    assert!(Config::try_parse_from(["chaos-equations", "--trail", "sparkle"]).is_err());
}

#[test]
fn reversed_bounds_fail_validation() {
    let err = parse(&["--t-start", "2", "--t-end", "2"]).validate().expect_err("empty range");
    assert!(err.to_string().contains("--t-end"));
}

#[test]
fn zero_sizes_fail_validation() {
    let err = parse(&["--iterations", "0"]).validate().expect_err("no iterations");
    assert!(err.to_string().contains("--iterations"));
    let err = parse(&["--steps-per-frame", "0"]).validate().expect_err("no steps");
    assert!(err.to_string().contains("--steps-per-frame"));
    let err = parse(&["--width", "0"]).validate().expect_err("no width");
    assert!(err.to_string().contains("--width"));
}

#[test]
fn deltas_must_be_positive() {
    let err = parse(&["--delta-per-step", "0"]).validate().expect_err("zero delta");
    assert!(err.to_string().contains("--delta-per-step"));
    let err = parse(&["--delta-minimum", "0"]).validate().expect_err("zero floor");
    assert!(err.to_string().contains("--delta-minimum"));
}

#[test]
fn trail_presets_fade_by_subtraction() {
    assert_eq!(TrailPreset::Fast.fade_amount(), 10.0 / 255.0);
    assert_eq!(TrailPreset::Slow.fade_amount(), 2.0 / 255.0);
    assert_eq!(TrailPreset::Frozen.fade_amount(), 0.0);
    assert_eq!(TrailPreset::Instant.fade_amount(), 1.0);
    assert_eq!(DotSize::Small.pixels(), 1.0);
    assert_eq!(DotSize::Medium.pixels(), 3.0);
    assert_eq!(DotSize::Large.pixels(), 10.0);
}
