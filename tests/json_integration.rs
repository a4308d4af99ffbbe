//! Integration tests for JSON output mode and CLI error handling.
//!
//! Guarantees tested:
//! - JSON mode outputs only JSON to stdout
//! - Exit code 2 for clap/usage errors in JSON mode
//! - Exit code 12 for configuration errors, reported as JSON in JSON mode
//! - --help and --version return JSON payloads in JSON mode
//! - No ANSI escape codes in JSON output

mod common;

use common::{assert_stderr_contains, parse_json, stdout, TestProject};

#[test]
fn test_json_usage_error() {
    let project = TestProject::starters();
    let output = project.run_expect(&["--json", "lookup"], 2);
    let json = parse_json(&output);
    assert_eq!(json["ok"], false);
    assert_eq!(json["schema_id"], "dexcrate.error");
    assert_eq!(json["errors"][0]["code"], "usage_error");
    assert!(json["data"].is_null());
}

#[test]
fn test_json_help() {
    let project = TestProject::starters();
    let output = project.run_expect(&["--json", "--help"], 0);
    let json = parse_json(&output);
    assert_eq!(json["ok"], true);
    assert!(json["help"].as_str().unwrap().contains("lookup"));
}

#[test]
fn test_json_version() {
    let project = TestProject::starters();
    let output = project.run_expect(&["--json", "--version"], 0);
    let json = parse_json(&output);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_human_help_lists_commands() {
    let project = TestProject::starters();
    let output = project.run_expect(&["--help"], 0);
    let out = stdout(&output);
    assert!(out.contains("Usage: dexcrate"));
    for command in ["lookup", "resolve", "distance", "names", "shell"] {
        assert!(out.contains(command), "help should list {command}");
    }
}

#[test]
fn test_json_output_has_no_ansi() {
    let project = TestProject::starters();
    let output = project.run_expect(&["--json", "resolve", "pikachoo"], 1);
    assert!(!stdout(&output).contains('\x1b'));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_max_distance_applies() {
    let project = TestProject::starters();
    project.write_config("[suggest]\nmax_distance = 1\n");

    let output = project.run_expect(&["--json", "resolve", "pikachoo"], 2);
    let json = parse_json(&output);
    assert_eq!(json["max_distance"], 1);
    assert_eq!(json["resolution"]["action"], "reject");

    // Distance 1 still suggests
    project.run_expect(&["resolve", "pikachuu"], 1);
}

#[test]
fn test_invalid_config_is_config_error() {
    let project = TestProject::starters();
    project.write_config("[suggest]\nmax_distance = 50\n");
    let output = project.run_expect(&["resolve", "pikachu"], 12);
    assert_stderr_contains(&output, "Failed to load configuration");
    assert_stderr_contains(&output, "max_distance");
}

#[test]
fn test_invalid_config_json() {
    let project = TestProject::starters();
    project.write_config("[api]\nunknown = true\n");
    let output = project.run_expect(&["--json", "distance", "a", "b"], 12);
    let json = parse_json(&output);
    assert_eq!(json["ok"], false);
    assert!(json["errors"][0]["details"]
        .as_str()
        .unwrap()
        .contains("unknown"));
}

#[test]
fn test_missing_explicit_config() {
    let project = TestProject::starters();
    let output = project.run_expect(&["--config", "missing.toml", "distance", "a", "b"], 12);
    assert_stderr_contains(&output, "Config file not found");
}
