//! Tests for the postwatch configuration system.

use std::sync::Mutex;

use postwatch_core::config::{AnnotatorKind, CliOverrides, PostwatchConfig};
use postwatch_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all POSTWATCH_ env vars and point HOME at an empty directory.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "POSTWATCH_DETECTOR_CONTAMINATION",
        "POSTWATCH_DETECTOR_N_ESTIMATORS",
        "POSTWATCH_DETECTOR_SEED",
        "POSTWATCH_RULES_KEYWORD_THRESHOLD",
        "POSTWATCH_RULES_ENGAGEMENT_QUANTILE",
        "POSTWATCH_ENTITIES_ANNOTATOR",
        "POSTWATCH_SYNTH_SEED",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

#[test]
fn test_defaults_without_any_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = PostwatchConfig::load(dir.path(), None, None).unwrap();

    assert_eq!(config.detector.effective_contamination(), 0.15);
    assert_eq!(config.detector.effective_n_estimators(), 100);
    assert_eq!(config.detector.effective_seed(), 42);
    assert_eq!(config.detector.effective_max_samples(1000), 256);
    assert_eq!(config.detector.effective_max_samples(40), 40);
    assert_eq!(config.rules.effective_keyword_threshold(), 3);
    assert_eq!(config.rules.effective_engagement_quantile(), 0.90);
    assert_eq!(config.entities.effective_annotator(), AnnotatorKind::Gazetteer);
    assert_eq!(config.entities.effective_max_chars(), 500);
    assert_eq!(config.synth.effective_rows(), 300);
}

#[test]
fn test_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".postwatch")).unwrap();
    std::fs::write(
        home.path().join(".postwatch").join("config.toml"),
        "[rules]\nkeyword_threshold = 5\n\n[synth]\nrows = 50\n",
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("postwatch.toml"),
        "[detector]\nseed = 7\nn_estimators = 25\n\n[synth]\nrows = 80\n",
    )
    .unwrap();

    std::env::set_var("POSTWATCH_DETECTOR_SEED", "11");

    let cli = CliOverrides {
        annotator: Some(AnnotatorKind::None),
        synth_rows: Some(120),
        ..Default::default()
    };
    let config = PostwatchConfig::load(dir.path(), None, Some(&cli)).unwrap();

    // User file survives where nothing overrides it.
    assert_eq!(config.rules.keyword_threshold, Some(5));
    // Project beats user.
    assert_eq!(config.detector.n_estimators, Some(25));
    // Env beats project.
    assert_eq!(config.detector.seed, Some(11));
    // CLI beats everything.
    assert_eq!(config.synth.rows, Some(120));
    assert_eq!(config.entities.annotator, Some(AnnotatorKind::None));

    std::env::remove_var("POSTWATCH_DETECTOR_SEED");
}

#[test]
fn test_explicit_config_path_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let missing = dir.path().join("nope.toml");
    let err = PostwatchConfig::load(dir.path(), Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("postwatch.toml"), "[detector\nseed = ").unwrap();
    let err = PostwatchConfig::load(dir.path(), None, None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_validation_rejects_bad_contamination() {
    let err = PostwatchConfig::from_toml("[detector]\ncontamination = 0.7\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "detector.contamination");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(PostwatchConfig::from_toml("[detector]\ncontamination = 0.0\n").is_err());
    assert!(PostwatchConfig::from_toml("[detector]\nn_estimators = 0\n").is_err());
    assert!(PostwatchConfig::from_toml("[rules]\nengagement_quantile = 1.5\n").is_err());
    assert!(PostwatchConfig::from_toml("[entities]\nmax_chars = 0\n").is_err());
}

#[test]
fn test_unknown_keys_ignored_and_annotator_parsed() {
    let config = PostwatchConfig::from_toml(
        "[entities]\nannotator = \"none\"\nfuture_option = true\n\n[telemetry]\nenabled = true\n",
    )
    .unwrap();
    assert_eq!(config.entities.effective_annotator(), AnnotatorKind::None);
}

#[test]
fn test_round_trip_through_toml() {
    let config = PostwatchConfig::from_toml("[detector]\nseed = 99\n").unwrap();
    let rendered = config.to_toml().unwrap();
    let back = PostwatchConfig::from_toml(&rendered).unwrap();
    assert_eq!(back.detector.seed, Some(99));
}
