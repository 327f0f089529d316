//! Integration tests for the simulate command (CLI)

use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use crate::helpers::{stories_cmd, write_file};

/// Run `stories simulate` and parse stdout as JSON lines.
fn simulate(dir: &TempDir, script: &str, extra: &[&str]) -> Vec<Value> {
    let path = write_file(dir.path(), "script.txt", script);
    let config = dir.path().join("missing-config.toml");
    let output = stories_cmd()
        .arg("simulate")
        .arg(&path)
        .arg("--config")
        .arg(&config)
        .args(extra)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn kinds(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["kind"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn default_config_runs_ten_stories_of_three_seconds() {
    let dir = TempDir::new().unwrap();
    let records = simulate(&dir, "start\nwait 3000\n", &[]);

    let events: Vec<&Value> = records.iter().filter(|r| r["kind"] == "event").collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "next");
    assert_eq!(events[0]["index"], 1);
    assert_eq!(events[0]["at_ms"], 3000);

    let summary = records.last().unwrap();
    assert_eq!(summary["kind"], "summary");
    assert_eq!(summary["state"], "running");
    assert_eq!(summary["fractions"].as_array().unwrap().len(), 10);
}

#[test]
fn skipping_past_the_end_completes() {
    let dir = TempDir::new().unwrap();
    let script = "start_from 2\nskip\nskip\nskip\n";
    let records = simulate(&dir, script, &["-n", "5"]);
    let events: Vec<&str> = records
        .iter()
        .filter(|r| r["kind"] == "event")
        .map(|r| r["event"].as_str().unwrap())
        .collect();
    assert_eq!(events, vec!["next", "next", "complete"]);
    assert_eq!(records.last().unwrap()["state"], "completed");
}

#[test]
fn rejected_commands_are_reported_inline() {
    let dir = TempDir::new().unwrap();
    let records = simulate(&dir, "resume\nstart\nresume\n", &["-n", "2"]);
    assert_eq!(kinds(&records), vec!["error", "command", "error", "summary"]);
    assert_eq!(records[0]["line"], 1);
    assert_eq!(records[2]["message"], "Cannot resume while running");
}

#[test]
fn progress_flag_adds_fill_records() {
    let dir = TempDir::new().unwrap();
    let records = simulate(
        &dir,
        "start\nwait 1000\n",
        &["-n", "2", "-d", "1000", "--step", "500", "--progress"],
    );
    let fills: Vec<(u64, f64)> = records
        .iter()
        .filter(|r| r["kind"] == "fill")
        .map(|r| (r["index"].as_u64().unwrap(), r["fraction"].as_f64().unwrap()))
        .collect();
    assert_eq!(fills, vec![(0, 0.5), (0, 1.0), (1, 0.0)]);
}

#[test]
fn script_from_stdin() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("none.toml");
    stories_cmd()
        .args(["simulate", "-", "-n", "3", "--config"])
        .arg(&config)
        .write_stdin("start\nskip\nreverse\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""event":"prev""#));
}

#[test]
fn config_file_sets_defaults() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        dir.path(),
        "config.toml",
        "[playback]\nstories_count = 2\nstory_duration_ms = 100\n",
    );
    let script = write_file(dir.path(), "s.txt", "start\nwait 250\n");
    stories_cmd()
        .arg("simulate")
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""event":"complete""#));
}

#[test]
fn parse_errors_name_the_line() {
    let dir = TempDir::new().unwrap();
    let script = write_file(dir.path(), "bad.txt", "start\nfly away\n");
    stories_cmd()
        .arg("simulate")
        .arg(&script)
        .arg("--config")
        .arg(dir.path().join("none.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn zero_count_is_rejected() {
    let dir = TempDir::new().unwrap();
    let script = write_file(dir.path(), "s.txt", "start\n");
    stories_cmd()
        .arg("simulate")
        .arg(&script)
        .args(["-n", "0", "--config"])
        .arg(dir.path().join("none.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn missing_script_fails() {
    let dir = TempDir::new().unwrap();
    stories_cmd()
        .args(["simulate", "/definitely/not/here.txt", "--config"])
        .arg(dir.path().join("none.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}
