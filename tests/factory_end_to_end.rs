//! End-to-end tests for loggers handed out by [`LoggerFactory`].
//!
//! Each test builds a factory over a scratch directory and checks what
//! lands in the rotated files.

use std::fs;
use std::sync::Arc;
use std::thread;

use scoped_log::logging::{Diagnostics, Level, LevelMask, ScopedLogger};
use scoped_log::sink::{Schedule, SinkConstraints};
use scoped_log::{FactoryConfig, FactoryError, LoggerFactory, debug_log, error_log, info_log};
use test_support::{CaptureWriter, file_names, scratch_dir};

fn factory(level: &str, sink: SinkConstraints) -> LoggerFactory {
    LoggerFactory::with_diagnostics(&FactoryConfig::new(level, sink), Diagnostics::Disabled)
        .expect("factory builds")
}

fn contents(dir: &std::path::Path) -> Vec<String> {
    file_names(dir)
        .into_iter()
        .map(|name| fs::read_to_string(dir.join(name)).unwrap())
        .collect()
}

// ============================================================================
// Shared Sink
// ============================================================================

/// Verifies loggers with different scopes interleave in one file, each line
/// carrying its own tag and upper-cased scope.
#[test]
fn scopes_share_one_file() {
    let dir = scratch_dir();
    let factory = factory(
        "INFO|WARN|ERROR",
        SinkConstraints::new(dir.path(), "service.log"),
    );

    let db = factory.new_logger("db");
    let http = factory.new_logger("Http");
    db.info("pool ready");
    http.warn("slow client");
    db.error("lost connection");

    let files = contents(dir.path());
    assert_eq!(files.len(), 1);
    let lines: Vec<&str> = files[0].lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("[INFO ] DB pool ready"));
    assert!(lines[1].ends_with("[WARN ] HTTP slow client"));
    assert!(lines[2].ends_with("[ERROR] DB lost connection"));
}

/// Verifies the level spec is applied to every logger, debug sub-levels
/// included.
#[test]
fn level_spec_gates_every_logger() {
    let dir = scratch_dir();
    let factory = factory(
        "DEBUG2|ERROR",
        SinkConstraints::new(dir.path(), "service.log"),
    );
    let logger = factory.new_logger("jobs");

    logger.info("dropped");
    logger.debug(1, "dropped");
    debug_log!(logger, 2, "queue depth {}", 7);
    debug_log!(logger, 9, "worker {} idle", 3);
    error_log!(logger, "job {} failed", 42);

    let files = contents(dir.path());
    let lines: Vec<&str> = files[0].lines().collect();
    assert_eq!(lines.len(), 3, "{lines:?}");
    assert!(lines[0].ends_with("[DEBUG] JOBS queue depth 7"));
    assert!(lines[1].ends_with("[DEBUG] JOBS worker 3 idle"));
    assert!(lines[2].ends_with("[ERROR] JOBS job 42 failed"));
}

/// Verifies lines are attributed to the caller, not to the factory.
#[test]
fn lines_name_the_calling_file() {
    let dir = scratch_dir();
    let factory = factory("ALL", SinkConstraints::new(dir.path(), "a.log"));
    let logger = factory.new_logger("app");

    let line = line!() + 1;
    info_log!(logger, "hello");

    let files = contents(dir.path());
    assert!(
        files[0].contains(&format!(" factory_end_to_end.rs:{line}: [INFO ] APP hello")),
        "{}",
        files[0]
    );
}

/// Verifies loggers from one factory keep rotating the same file under load.
#[test]
fn concurrent_loggers_rotate_together() {
    let dir = scratch_dir();
    let factory = Arc::new(factory(
        "INFO",
        SinkConstraints::new(
            dir.path(),
            "[year][month][day]-[hour][minute][second]-[subsecond digits:9].log",
        )
        .with_max_size(2048)
        .with_history(4),
    ));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || {
                let logger = factory.new_logger(&format!("w{worker}"));
                for n in 0..200 {
                    info_log!(logger, "record {n}");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let names = file_names(dir.path());
    assert_eq!(names.len(), 4);
    assert_eq!(factory.sink().history(), names);
    for text in contents(dir.path()) {
        assert!(text.len() < 2048);
        assert!(text.lines().all(|line| line.contains(" [INFO ] W")));
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Verifies configuration errors name their source.
#[test]
fn configuration_errors_are_typed() {
    let dir = scratch_dir();

    let error = LoggerFactory::with_diagnostics(
        &FactoryConfig::new("", SinkConstraints::new(dir.path(), "a.log")),
        Diagnostics::Disabled,
    )
    .unwrap_err();
    assert!(matches!(error, FactoryError::Level(_)));
    assert_eq!(error.to_string(), "invalid log level: level spec is empty");

    let error = LoggerFactory::with_diagnostics(
        &FactoryConfig::new(
            "INFO",
            SinkConstraints::new(dir.path(), "a.log").with_schedule(Schedule::daily("25:00:00")),
        ),
        Diagnostics::Disabled,
    )
    .unwrap_err();
    assert!(matches!(error, FactoryError::Sink(_)));
}

/// Verifies sink diagnostics go to the injected channel.
#[test]
fn diagnostics_reach_the_injected_logger() {
    let dir = scratch_dir();
    let capture = CaptureWriter::shared();
    let reporter = ScopedLogger::console_mirrored(
        capture.clone(),
        LevelMask::ALL,
        "CORE",
        Diagnostics::Disabled,
    );
    reporter.set_level(LevelMask::ALL.without(Level::TRACE));

    let factory = LoggerFactory::with_diagnostics(
        &FactoryConfig::new("INFO", SinkConstraints::new(dir.path(), "a.log")),
        Arc::new(reporter).into(),
    )
    .unwrap();

    assert!(
        capture
            .text()
            .contains(&format!("[DEBUG] CORE New log: file={}", dir.path().join("a.log").display()))
    );
    assert!(!factory.sink().is_scheduled());
}

/// Verifies a factory configuration loads from JSON with defaults filled in.
#[cfg(feature = "serde")]
#[test]
fn configuration_loads_from_json() {
    let config: FactoryConfig = serde_json::from_str(
        r#"{
            "level": "debug0|info",
            "sink": {
                "directory": "/var/log/app",
                "rotation": { "max_size": 1048576, "history": 5,
                              "schedule": { "kind": "daily", "parameter": "04:00:00" } }
            }
        }"#,
    )
    .unwrap();

    assert_eq!(config.level, "debug0|info");
    assert_eq!(config.sink.directory, std::path::PathBuf::from("/var/log/app"));
    assert_eq!(config.sink.file_name, scoped_log::sink::DEFAULT_FILE_NAME);
    assert_eq!(config.sink.rotation.max_size, 1_048_576);
    assert_eq!(config.sink.rotation.history, 5);
    assert_eq!(config.sink.rotation.schedule, Schedule::daily("04:00:00"));
}
