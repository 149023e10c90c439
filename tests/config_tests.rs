//! Structured configuration applied through the registry

mod common;

use common::Harness;
use logger_registry::core::{LogLevel, SinkKind, TimeType};
use logger_registry::LoggerError;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_sink_mask_routes_every_level_to_stdout() {
    let harness = Harness::new();
    let results = harness
        .registry
        .apply_document(&json!({"name": "x", "level": 0, "sink": 1}));
    assert_eq!(results.len(), 1);
    let logger = results
        .into_iter()
        .next()
        .and_then(|r| r.ok())
        .flatten()
        .expect("literal name returns its logger");

    logger.trace("t");
    logger.debug("d");
    logger.info("i");
    logger.warn("w");
    logger.error("e");
    logger.critical("c");

    let levels: Vec<LogLevel> = harness
        .stdout
        .records_for("x")
        .into_iter()
        .map(|r| r.level)
        .collect();
    assert_eq!(
        levels,
        vec![
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
            LogLevel::Critical
        ]
    );
    assert!(harness.syslog.records_for("x").is_empty());
    assert_eq!(logger.sink_level(SinkKind::Syslog), Some(LogLevel::Off));
}

#[test]
fn test_regex_record_with_string_fields() {
    let harness = Harness::new();
    let results = harness.registry.apply_document(&json!({
        "logger": {"name": "svc\\..*", "regex": true, "level": "3", "time_type": "1", "pattern": "%v"}
    }));

    assert!(matches!(results.as_slice(), [Ok(None)]));
    let logger = harness.registry.get_logger("svc.api");
    assert_eq!(logger.level(), LogLevel::Warn);
    assert_eq!(logger.time_type(), TimeType::Utc);
    assert_eq!(logger.pattern(), "%v");
}

#[test]
fn test_failed_record_leaves_siblings_applied() {
    let harness = Harness::new();
    let results = harness.registry.apply_document(&json!({
        "loggers": [
            {"name": "first", "level": 4},
            {"name": "broken", "level": "very"},
            {"name": "third", "level": 1}
        ]
    }));

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(LoggerError::InvalidConfiguration { .. })));
    assert!(results[2].is_ok());

    assert_eq!(harness.registry.get_logger("first").level(), LogLevel::Error);
    assert_eq!(harness.registry.get_logger("third").level(), LogLevel::Debug);
    assert!(!harness.registry.logger_names().contains(&"broken".to_string()));
}

#[test]
fn test_unknown_values_take_safe_defaults() {
    let harness = Harness::new();
    harness
        .registry
        .apply_document(&json!({"name": "odd", "level": 17, "time_type": 5}));

    let logger = harness.registry.get_logger("odd");
    assert_eq!(logger.level(), LogLevel::Off);
    assert_eq!(logger.time_type(), TimeType::Local);
}

#[test]
fn test_config_before_and_after_creation() {
    let harness = Harness::new();
    let early = harness.registry.get_logger("node.1");

    harness
        .registry
        .apply_document(&json!([{"name": "node\\.\\d", "regex": true, "level": 5}]));
    let late = harness.registry.get_logger("node.2");

    assert_eq!(early.level(), LogLevel::Critical);
    assert_eq!(late.level(), LogLevel::Critical);
}

#[test]
fn test_apply_json_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("loggers.json");
    fs::write(
        &path,
        r#"{ "loggers": [ { "name": "file.json", "level": 2, "sink": 2 } ] }"#,
    )
    .expect("write config");

    let harness = Harness::new();
    let results = harness.registry.apply_file(&path).expect("readable file");

    assert_eq!(results.len(), 1);
    let logger = harness.registry.get_logger("file.json");
    assert_eq!(logger.level(), LogLevel::Info);
    assert_eq!(logger.sink_level(SinkKind::Stdout), Some(LogLevel::Off));
    assert_eq!(logger.sink_level(SinkKind::Syslog), Some(LogLevel::Trace));
}

#[test]
fn test_apply_toml_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("loggers.toml");
    fs::write(
        &path,
        r#"
[[loggers]]
name = "file.toml"
level = 4
pattern = "[%n] %v"
time_type = 1

[[loggers]]
name = "file\\..*"
regex = true
img_path = "/var/tmp/dumps"
"#,
    )
    .expect("write config");

    let harness = Harness::new();
    let results = harness.registry.apply_file(&path).expect("readable file");

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.is_ok()));
    let logger = harness.registry.get_logger("file.toml");
    assert_eq!(logger.level(), LogLevel::Error);
    assert_eq!(logger.pattern(), "[%n] %v");
    assert_eq!(logger.time_type(), TimeType::Utc);
    assert_eq!(logger.path(), std::path::PathBuf::from("/var/tmp/dumps"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let harness = Harness::new();
    let result = harness.registry.apply_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(LoggerError::ConfigSource(_))));
}
