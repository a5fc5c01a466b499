//! Integration tests for the `venue` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the check, rects,
//! layout and occurrences subcommands through the actual binary, including
//! stdin piping, fixture files, exit codes and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: absolute path of a fixture file.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: run the binary and parse its stdout as JSON.
fn run_json(args: &[&str], stdin: Option<&str>) -> serde_json::Value {
    let mut cmd = Command::cargo_bin("venue").unwrap();
    cmd.args(args);
    if let Some(input) = stdin {
        cmd.write_stdin(input);
    }
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout should be valid JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_single_range_from_stdin() {
    let input = r#"{"date":"2025-01-01","startTime":"10:00","endTime":"11:00"}"#;
    let existing = fixture("existing.json");

    let json = run_json(&["check", "-e", &existing], Some(input));

    assert_eq!(json["hasCollision"], true);
    assert_eq!(json["conflictingRange"]["startTime"], "09:00");
}

#[test]
fn check_touching_range_is_free() {
    let input = r#"{"date":"2025-01-01","startTime":"10:30","endTime":"12:00"}"#;
    let existing = fixture("existing.json");

    let json = run_json(&["check", "-e", &existing], Some(input));

    assert_eq!(json["hasCollision"], false);
    assert!(json.get("conflictingRange").is_none());
}

#[test]
fn check_batch_reports_internal_collision() {
    let batch = fixture("batch.json");

    let json = run_json(&["check", "-n", &batch], None);

    assert_eq!(json["hasCollision"], true);
    let conflicts = json["conflictingRanges"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["startTime"], "11:00");
}

#[test]
fn check_fail_on_collision_sets_exit_code() {
    Command::cargo_bin("venue")
        .unwrap()
        .args(["check", "-n", &fixture("batch.json"), "-e", &fixture("existing.json")])
        .arg("--fail-on-collision")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"hasCollision\": true"));
}

#[test]
fn check_rejects_malformed_time() {
    let input = r#"{"date":"2025-01-01","startTime":"10:5","endTime":"11:00"}"#;

    Command::cargo_bin("venue")
        .unwrap()
        .arg("check")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid candidate range"));
}

#[test]
fn check_missing_existing_file_fails() {
    Command::cargo_bin("venue")
        .unwrap()
        .args(["check", "-n", &fixture("batch.json"), "-e", "/nonexistent/ranges.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// rects
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn rects_moved_table_excludes_itself() {
    let input = r#"{"id":"table-1","x":10,"y":0,"width":50,"height":50}"#;
    let floorplan = fixture("floorplan.json");

    let json = run_json(
        &["rects", "-e", &floorplan, "--exclude", "table-1"],
        Some(input),
    );
    assert_eq!(json["collides"], false);

    let json = run_json(&["rects", "-e", &floorplan], Some(input));
    assert_eq!(json["collides"], true);
}

#[test]
fn rects_touching_bar_does_not_collide() {
    // Directly above the bar, sharing its top edge at y = 200.
    let input = r#"{"x":0,"y":150,"width":50,"height":50}"#;

    Command::cargo_bin("venue")
        .unwrap()
        .args(["rects", "-e", &fixture("floorplan.json"), "--fail-on-collision"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"collides\": false"));
}

// ─────────────────────────────────────────────────────────────────────────────
// layout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn layout_with_explicit_sizes() {
    let json = run_json(
        &[
            "layout",
            "--zone-width",
            "400",
            "--zone-height",
            "300",
            "--table-width",
            "50",
            "--table-height",
            "50",
            "--spacing",
            "20",
        ],
        None,
    );

    assert_eq!(json["count"], 20);
    assert_eq!(json["positions"][0]["x"], 20.0);
    assert_eq!(json["positions"][0]["y"], 20.0);
}

#[test]
fn layout_defaults_come_from_environment() {
    let output = Command::cargo_bin("venue")
        .unwrap()
        .args(["layout", "--zone-width", "400", "--zone-height", "300"])
        .env("VENUE_TABLE_WIDTH", "50")
        .env("VENUE_TABLE_HEIGHT", "50")
        .env("VENUE_TABLE_SPACING", "20")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["count"], 20);
}

#[test]
fn layout_defaults_match_engine_defaults() {
    let output = Command::cargo_bin("venue")
        .unwrap()
        .args(["layout", "--zone-width", "400", "--zone-height", "300"])
        .env_remove("VENUE_TABLE_WIDTH")
        .env_remove("VENUE_TABLE_HEIGHT")
        .env_remove("VENUE_TABLE_SPACING")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let expected = venue_engine::LayoutOptions::default().layout(400.0, 300.0);
    assert_eq!(json["count"], expected.count);
    assert_eq!(json["count"], 12);
}

#[test]
fn layout_zone_too_small() {
    let json = run_json(
        &[
            "layout",
            "--zone-width",
            "10",
            "--zone-height",
            "10",
            "--table-width",
            "50",
            "--table-height",
            "50",
            "--spacing",
            "5",
        ],
        None,
    );

    assert_eq!(json["count"], 0);
    assert_eq!(json["positions"].as_array().unwrap().len(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// occurrences
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn occurrences_from_file_with_count() {
    let json = run_json(
        &["occurrences", "-i", &fixture("line.json"), "--count", "2"],
        None,
    );

    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["lineId"], "line-fri");
    assert_eq!(list[0]["date"], "2026-03-06");
    assert_eq!(list[1]["date"], "2026-03-13");
    assert_eq!(list[1]["endTime"], "04:00");
}

#[test]
fn occurrences_rejects_bad_until() {
    Command::cargo_bin("venue")
        .unwrap()
        .args(["occurrences", "-i", &fixture("line.json"), "--until", "next week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --until date"));
}

#[test]
fn occurrences_reports_bad_timezone() {
    let line = r#"{"id":"l","name":"x","rrule":"FREQ=DAILY","startDate":"2026-03-01",
                   "startTime":"10:00","endTime":"11:00","timezone":"Nowhere/Town"}"#;

    Command::cargo_bin("venue")
        .unwrap()
        .args(["occurrences", "--count", "1"])
        .write_stdin(line)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to expand line 'l'"));
}

#[test]
fn no_subcommand_shows_usage() {
    Command::cargo_bin("venue")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
