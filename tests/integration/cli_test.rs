//! Integration tests for help, config and completions (CLI)

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{stories_cmd, write_file};

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    stories_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn simulate_without_script_shows_usage_error() {
    stories_cmd()
        .arg("simulate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<SCRIPT>"));
}

#[test]
fn play_refuses_non_interactive_terminal() {
    let dir = TempDir::new().unwrap();
    stories_cmd()
        .arg("play")
        .arg("--config")
        .arg(dir.path().join("none.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_show_prints_defaults_when_file_missing() {
    let dir = TempDir::new().unwrap();
    stories_cmd()
        .args(["config", "show", "--config"])
        .arg(dir.path().join("none.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("stories_count = 10"))
        .stdout(predicate::str::contains("story_duration_ms = 3000"))
        .stdout(predicate::str::contains("tick_interval_ms = 16"));
}

#[test]
fn config_show_reflects_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "c.toml", "[playback]\nstories_count = 4\n");
    stories_cmd()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("stories_count = 4"));
}

#[test]
fn config_path_echoes_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    stories_cmd()
        .args(["config", "path", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn config_init_writes_once_unless_forced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sub").join("config.toml");

    stories_cmd()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[playback]"));

    stories_cmd()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    stories_cmd()
        .args(["config", "init", "--force", "--config"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "c.toml", "[playback\n");
    stories_cmd()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn bash_completions_mention_binary() {
    stories_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stories"));
}
