//! Tests for logging initialization
//!
//! A global subscriber can be installed once per process, so the file sink
//! and the double-init failure are checked in a single test.

use gof::logging::{init_logging_with_config, LogConfig, LogFormat};
use tracing::info;

#[test]
fn test_file_sink_receives_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs/gof.log");
    let config = LogConfig {
        format: LogFormat::Json,
        color: false,
        file: Some(path.clone()),
        target_filter: Some("logging_tests=info".to_string()),
        ..LogConfig::default()
    };

    let guard = init_logging_with_config(&config).unwrap();
    info!(request_id = "abc", "hello from the test");

    assert!(init_logging_with_config(&LogConfig::default()).is_err());

    // Dropping the guard flushes the non-blocking writer.
    drop(guard);
    let contents = std::fs::read_to_string(&path).unwrap();
    let line = contents
        .lines()
        .find(|l| l.contains("hello from the test"))
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(parsed["level"], "INFO");
    assert_eq!(parsed["fields"]["request_id"], "abc");
}
