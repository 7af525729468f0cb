//! Integration tests for the log registry
//!
//! These tests verify:
//! - Lazy stream creation and reuse
//! - The global level sweep and its non-retroactive scope
//! - The empty-argument guard
//! - On-disk naming, the active-file alias, and retention pruning
//! - Caller-location rendering
//! - Terminal severity flushing

use chrono::Local;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use streamlog::prelude::*;
use streamlog::{error, info, panic_log};
use tempfile::TempDir;

fn dated_file(dir: &TempDir, stream: &str) -> std::path::PathBuf {
    dir.path()
        .join(format!("{}--{}.log", Local::now().format("%Y-%m-%d"), stream))
}

#[test]
fn test_first_call_creates_stream_second_reuses_it() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    info!(registry, "api", "first");
    info!(registry, "api", "second");

    assert_eq!(registry.stream_count(), 1);

    // No duplicate file sinks: exactly one dated file for the stream
    let dated = fs::read_dir(dir.path())
        .expect("Failed to read log dir")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|n| n.ends_with("--api.log"))
        })
        .count();
    assert_eq!(dated, 1, "one stream maps to one dated file");

    registry.flush_all().expect("Failed to flush");
    let content = fs::read_to_string(dated_file(&dir, "api")).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_global_sweep_applies_to_existing_streams_only() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    let a = registry.logger("a");
    let b = registry.logger("b");
    let c = registry.logger("c");

    registry.set_global_level("debug").expect("debug is valid");
    registry.set_global_level("error").expect("error is valid");

    for logger in [&a, &b, &c] {
        assert_eq!(logger.min_level(), LogLevel::Error);
    }

    // A stream created after the sweep starts at its own default
    let late = registry.logger("late");
    assert_eq!(late.min_level(), LogLevel::Info);
}

#[test]
fn test_invalid_level_returns_error_and_mutates_nothing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    let a = registry.logger("a");
    registry.set_global_level("debug").expect("debug is valid");

    let err = registry
        .set_global_level("bogus")
        .expect_err("bogus must be rejected");
    assert!(matches!(err, LoggerError::InvalidLevel { .. }));
    assert!(err.to_string().contains("level error"));
    assert_eq!(a.min_level(), LogLevel::Debug);
}

#[test]
fn test_empty_arguments_emit_nothing_but_register_the_stream() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    info!(registry, "quiet");
    error!(registry, "quiet");

    assert!(registry.is_registered("quiet"));

    registry.flush_all().expect("Failed to flush");
    let content = fs::read_to_string(dated_file(&dir, "quiet")).expect("Failed to read log file");
    assert!(content.is_empty(), "zero-argument calls must not emit lines");
}

#[test]
fn test_sweep_threshold_filters_file_output() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    info!(registry, "svc", "kept before sweep");
    registry.set_global_level("error").expect("error is valid");
    info!(registry, "svc", "dropped after sweep");
    error!(registry, "svc", "kept after sweep");

    registry.flush_all().expect("Failed to flush");
    let content = fs::read_to_string(dated_file(&dir, "svc")).expect("Failed to read log file");
    assert!(content.contains("kept before sweep"));
    assert!(!content.contains("dropped after sweep"));
    assert!(content.contains("kept after sweep"));
}

#[test]
fn test_on_disk_naming_pattern() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    info!(registry, "web", "hello");
    registry.flush_all().expect("Failed to flush");

    let dated = dated_file(&dir, "web");
    assert!(dated.exists(), "expected {}", dated.display());
}

#[cfg(unix)]
#[test]
fn test_alias_resolves_to_active_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    info!(registry, "web", "through the alias");
    registry.flush_all().expect("Failed to flush");

    let link = dir.path().join("web.log");
    let target = fs::read_link(&link).expect("alias should be a symlink");
    assert_eq!(dir.path().join(target), dated_file(&dir, "web"));

    let content = fs::read_to_string(&link).expect("alias should resolve");
    assert!(content.contains("through the alias"));
}

#[test]
fn test_expired_files_are_pruned() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let stale = dir.path().join("2000-01-01--svc.log");
    fs::write(&stale, "ancient\n").expect("Failed to seed stale file");

    let registry = LogRegistry::new(dir.path());
    info!(registry, "svc", "fresh");
    registry.flush_all().expect("Failed to flush");

    assert!(!stale.exists(), "file beyond retention must be pruned");
    assert!(dated_file(&dir, "svc").exists());
}

#[test]
fn test_files_inside_retention_are_kept() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let yesterday = Local::now().date_naive() - chrono::Duration::days(1);
    let recent = dir.path().join(format!("{}--svc.log", yesterday.format("%Y-%m-%d")));
    fs::write(&recent, "yesterday\n").expect("Failed to seed recent file");

    let registry = LogRegistry::new(dir.path());
    info!(registry, "svc", "today");

    assert!(recent.exists(), "file inside retention must survive");
}

fn emit_probe(registry: &LogRegistry) -> u32 {
    let line = line!() + 1;
    info!(registry, "caller", "probe message");
    line
}

#[test]
fn test_caller_location_renders_true_call_site() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    let line = emit_probe(&registry);
    registry.flush_all().expect("Failed to flush");

    let content = fs::read_to_string(dated_file(&dir, "caller")).expect("Failed to read log file");
    let expected = format!(" -->path: [func:emit_probe(registry_tests.rs:{})]", line);
    assert!(
        content.contains(&expected),
        "expected `{}` in `{}`",
        expected,
        content
    );
}

#[test]
fn test_line_format() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    info!(registry, "fmt", "payload", 42);
    registry.flush_all().expect("Failed to flush");

    let content = fs::read_to_string(dated_file(&dir, "fmt")).expect("Failed to read log file");
    let line = content.lines().next().expect("one line expected");

    // [YYYY-MM-DD HH:MM:SS] [INFO ] payload 42 -->path: [...]
    assert_eq!(&line[0..1], "[");
    assert_eq!(&line[5..6], "-");
    assert_eq!(&line[8..9], "-");
    assert_eq!(&line[11..12], " ");
    assert_eq!(&line[14..15], ":");
    assert_eq!(&line[17..18], ":");
    assert_eq!(&line[20..21], "]");
    assert!(line.contains("[INFO ]"));
    assert!(line.contains("payload 42"));
    assert!(line.contains(" -->path: [func:"));
}

#[test]
fn test_panic_severity_flushes_before_raising() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        panic_log!(registry, "crash", "invariant violated");
    }));

    let payload = result.expect_err("panic_log must raise");
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .expect("panic payload carries the message");
    assert_eq!(message, "invariant violated");

    let content = fs::read_to_string(dated_file(&dir, "crash")).expect("Failed to read log file");
    assert!(content.contains("[PANIC]"));
    assert!(content.contains("invariant violated"));
}

#[test]
fn test_panic_severity_with_no_arguments_is_a_no_op() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    // The empty-argument guard applies to terminal severities too
    panic_log!(registry, "crash");
    assert!(registry.is_registered("crash"));
}

#[test]
fn test_concurrent_first_use_constructs_one_logger() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = Arc::new(LogRegistry::new(dir.path()));

    let mut handles = vec![];
    for thread_id in 0..8 {
        let registry = Arc::clone(&registry);
        handles.push(std::thread::spawn(move || {
            for i in 0..10 {
                info!(registry, "shared", "thread", thread_id, "message", i);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(registry.stream_count(), 1);

    registry.flush_all().expect("Failed to flush");
    let content = fs::read_to_string(dated_file(&dir, "shared")).expect("Failed to read log file");
    assert_eq!(
        content.lines().count(),
        80,
        "all entries from 8 threads * 10 messages should land"
    );
}

#[test]
fn test_streams_are_isolated() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::new(dir.path());

    info!(registry, "alpha", "to alpha");
    info!(registry, "beta", "to beta");
    registry.flush_all().expect("Failed to flush");

    let alpha = fs::read_to_string(dated_file(&dir, "alpha")).expect("Failed to read alpha");
    let beta = fs::read_to_string(dated_file(&dir, "beta")).expect("Failed to read beta");
    assert!(alpha.contains("to alpha") && !alpha.contains("to beta"));
    assert!(beta.contains("to beta") && !beta.contains("to alpha"));
}

#[test]
fn test_custom_rotation_settings_flow_into_sinks() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = LogRegistry::builder(dir.path())
        .retention(Duration::from_secs(24 * 3600))
        .rotation_interval(Duration::from_secs(3600))
        .build();

    // Yesterday's file is already past a one-day retention window
    let two_days_ago = Local::now().date_naive() - chrono::Duration::days(2);
    let stale = dir
        .path()
        .join(format!("{}--svc.log", two_days_ago.format("%Y-%m-%d")));
    fs::write(&stale, "stale\n").expect("Failed to seed stale file");

    info!(registry, "svc", "current");
    assert!(!stale.exists());
}
