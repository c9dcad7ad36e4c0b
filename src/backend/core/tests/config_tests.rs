//! Configuration loading tests.

use std::io::Write;

use orderdesk_core::config::Config;
use orderdesk_core::telemetry::LogFormat;

#[test]
fn test_from_file_reads_logging_section() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[logging]
level = "debug"
format = "json"
include_location = true

[logging.module_levels]
"orderdesk_core::rbac" = "trace"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.logging.include_location);
    assert_eq!(
        config.logging.module_levels.get("orderdesk_core::rbac").map(String::as_str),
        Some("trace")
    );
}

#[test]
fn test_from_file_missing_section_uses_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "# nothing configured").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_from_file_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.code(), "CONFIGURATION_ERROR");
}
