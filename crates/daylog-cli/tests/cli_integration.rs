//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! They test the "wiring" between the CLI and the core library.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command with a settings file inside a temporary directory
fn cli_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("daylog").expect("Failed to find daylog binary");
    cmd.arg("--settings").arg(temp.path().join("settings.json"));
    cmd
}

/// Log files written under `dir`
fn log_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".log"))
        .collect();
    names.sort();
    names
}

// ============================================================================
// Emit Command Tests
// ============================================================================

#[test]
fn test_emit_writes_console_and_day_file() {
    let temp = TempDir::new().unwrap();
    let logs = temp.path().join("out");

    cli_cmd(&temp)
        .args(["emit", "--logger", "cli", "--no-color", "--format", "minimal", "--dir"])
        .arg(&logs)
        .args(["hello", "world"])
        .assert()
        .success()
        .stdout("[INFO] hello world\n");

    let files = log_files(&logs);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("cli - "), "unexpected file {}", files[0]);

    let content = fs::read_to_string(logs.join(&files[0])).unwrap();
    assert_eq!(content, "[INFO] hello world\n");
}

#[test]
fn test_emit_colors_console_by_default() {
    let temp = TempDir::new().unwrap();

    cli_cmd(&temp)
        .args(["emit", "--level", "error", "--format", "minimal", "--dir"])
        .arg(temp.path().join("out"))
        .arg("boom")
        .assert()
        .success()
        .stdout("\x1b[31m[ERROR] boom\x1b[0m\n");
}

#[test]
fn test_emit_below_threshold_is_silent() {
    let temp = TempDir::new().unwrap();
    let logs = temp.path().join("out");

    cli_cmd(&temp)
        .args(["emit", "--level", "debug", "--dir"])
        .arg(&logs)
        .arg("hidden")
        .assert()
        .success()
        .stdout("");

    assert!(log_files(&logs).is_empty());
}

#[test]
fn test_emit_threshold_override() {
    let temp = TempDir::new().unwrap();

    cli_cmd(&temp)
        .args(["emit", "--level", "trace", "--threshold", "TRACE", "--no-color", "--dir"])
        .arg(temp.path().join("out"))
        .arg("visible")
        .assert()
        .success()
        .stdout(predicate::str::contains("/TRACE] visible"));
}

#[test]
fn test_emit_rejects_unknown_level() {
    let temp = TempDir::new().unwrap();

    cli_cmd(&temp)
        .args(["emit", "--level", "loud", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown severity: loud"));
}

#[test]
fn test_emit_rejects_file_as_directory() {
    let temp = TempDir::new().unwrap();
    let occupied = temp.path().join("occupied");
    fs::write(&occupied, "data").unwrap();

    cli_cmd(&temp)
        .args(["emit", "--dir"])
        .arg(&occupied)
        .arg("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_emit_rejects_unknown_format() {
    let temp = TempDir::new().unwrap();

    cli_cmd(&temp)
        .args(["emit", "--format", "fancy", "--dir"])
        .arg(temp.path().join("out"))
        .arg("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format scheme: fancy"));
}

// ============================================================================
// Levels / Settings Command Tests
// ============================================================================

#[test]
fn test_levels_lists_all_severities() {
    let temp = TempDir::new().unwrap();

    cli_cmd(&temp)
        .arg("levels")
        .assert()
        .success()
        .stdout(predicate::str::contains("FATAL"))
        .stdout(predicate::str::contains("SUCCESS"))
        .stdout(predicate::str::contains("TRACE"));
}

#[test]
fn test_settings_seeds_missing_entries() {
    let temp = TempDir::new().unwrap();

    cli_cmd(&temp)
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"namingScheme\": \"logger\""))
        .stdout(predicate::str::contains("level: INFO"));

    let saved = fs::read_to_string(temp.path().join("settings.json")).unwrap();
    for key in [
        "level",
        "supportsColor",
        "useFile",
        "fileDirectory",
        "namingScheme",
        "customName",
        "format",
    ] {
        assert!(saved.contains(&format!("\"{}\"", key)), "missing {}", key);
    }
}

#[test]
fn test_settings_drive_emit() {
    let temp = TempDir::new().unwrap();
    let logs = temp.path().join("configured");
    fs::write(
        temp.path().join("settings.json"),
        format!(
            r#"{{"supportsColor": false, "format": "minimal", "namingScheme": "custom", "customName": "shared", "fileDirectory": {:?}}}"#,
            logs.to_string_lossy()
        ),
    )
    .unwrap();

    cli_cmd(&temp)
        .args(["emit", "--logger", "anything", "configured"])
        .assert()
        .success()
        .stdout("[INFO] configured\n");

    let files = log_files(&logs);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("shared - "));
}

#[test]
fn test_verbose_reports_cli_progress_on_stderr() {
    let temp = TempDir::new().unwrap();

    cli_cmd(&temp)
        .args(["-vv", "emit", "--no-color", "--format", "minimal", "--dir"])
        .arg(temp.path().join("out"))
        .arg("traced")
        .assert()
        .success()
        .stdout("[INFO] traced\n")
        .stderr(predicate::str::contains("settings loaded"))
        .stderr(predicate::str::contains("message emitted"));
}

#[test]
fn test_quiet_by_default() {
    let temp = TempDir::new().unwrap();

    cli_cmd(&temp)
        .env_remove("RUST_LOG")
        .args(["emit", "--format", "minimal", "--dir"])
        .arg(temp.path().join("out"))
        .arg("quiet")
        .assert()
        .success()
        .stderr(predicate::str::contains("message emitted").not());
}
