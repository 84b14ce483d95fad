//! Tests for apimap configuration loading and layering.

use apimap_core::config::{ApimapConfig, CliOverrides};
use apimap_core::errors::{ApimapErrorCode, ConfigError};

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

#[test]
fn test_defaults_without_project_file() {
    let dir = tempdir();
    let config = ApimapConfig::load(dir.path(), None, None).unwrap();
    assert_eq!(config, ApimapConfig::default());
    assert_eq!(config.scan.effective_max_file_size(), 1_048_576);
    assert_eq!(config.scan.effective_threads(), 0);
    assert!(!config.scan.effective_follow_symlinks());
    assert_eq!(config.output.effective_format(), "markdown");
    assert_eq!(config.output.effective_log_level(), "apimap=warn");
}

#[test]
fn test_project_file_then_cli_overrides() {
    let dir = tempdir();
    std::fs::write(
        dir.path().join("apimap.toml"),
        r#"
[scan]
extra_ignore = ["generated/"]
max_file_size = 2_000_000
threads = 2

[output]
format = "compact"
"#,
    )
    .unwrap();

    let cli = CliOverrides {
        extra_ignore: vec!["*.test.ts".to_string()],
        threads: Some(8),
        ..Default::default()
    };
    let config = ApimapConfig::load(dir.path(), None, Some(&cli)).unwrap();

    assert_eq!(config.scan.max_file_size, Some(2_000_000));
    assert_eq!(config.scan.threads, Some(8));
    assert_eq!(config.scan.extra_ignore, vec!["generated/", "*.test.ts"]);
    assert_eq!(config.output.effective_format(), "compact");
}

#[test]
fn test_explicit_config_path_must_exist() {
    let dir = tempdir();
    let missing = dir.path().join("nope.toml");
    let err = ApimapConfig::load(dir.path(), Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
    assert!(err.coded_string().starts_with("[CONFIG_ERROR]"));
}

#[test]
fn test_explicit_config_path_wins_over_project_file() {
    let dir = tempdir();
    std::fs::write(dir.path().join("apimap.toml"), "[output]\nformat = \"raw\"\n").unwrap();
    let other = dir.path().join("ci.toml");
    std::fs::write(&other, "[output]\nformat = \"compact\"\n").unwrap();

    let config = ApimapConfig::load(dir.path(), Some(&other), None).unwrap();
    assert_eq!(config.output.format.as_deref(), Some("compact"));
}

#[test]
fn test_invalid_toml_syntax() {
    let dir = tempdir();
    std::fs::write(dir.path().join("apimap.toml"), "this is not valid toml {{{{").unwrap();
    match ApimapConfig::load(dir.path(), None, None).unwrap_err() {
        ConfigError::ParseError { .. } => {}
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_zero_size_and_unknown_format() {
    let config = ApimapConfig::from_toml("[scan]\nmax_file_size = 0\n").unwrap();
    match ApimapConfig::validate(&config).unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "scan.max_file_size"),
        other => panic!("expected ValidationFailed, got {:?}", other),
    }

    let dir = tempdir();
    let cli = CliOverrides {
        format: Some("yaml".to_string()),
        ..Default::default()
    };
    match ApimapConfig::load(dir.path(), None, Some(&cli)).unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "output.format"),
        other => panic!("expected ValidationFailed, got {:?}", other),
    }
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = ApimapConfig::from_toml("[scan]\nfuture_option = true\n[telemetry]\nx = 1\n").unwrap();
    assert_eq!(config, ApimapConfig::default());
}
