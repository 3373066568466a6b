#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

#[test]
fn decode_json_output_is_valid_and_structured() {
	let json = run_json(&["decode", &fixture_arg("update_event.json"), "--json"]);

	assert_eq!(json["document"], "/users/alice");
	assert_eq!(json["value"]["age"], 42);
	assert_eq!(json["value"]["manager"], "/users/bob");
	assert_eq!(json["value"]["avatar"], "iVBORw0K");
	assert_eq!(json["value"]["home"]["latitude"], 52.52);
	assert_eq!(json["value"]["tags"][1], "ops");
	assert!(json["value"]["settings"]["beta"].is_null());
	assert_eq!(json["value"]["lastSeen"], "2019-03-01T12:00:00.123456Z");
}

#[test]
fn decode_old_side() {
	let json = run_json(&["decode", &fixture_arg("update_event.json"), "--old", "--json"]);
	assert_eq!(json["value"]["age"], 41);
	assert!(json["value"].get("verified").is_none());
}

#[test]
fn info_lists_tags_and_mask() {
	let output = run(&["info", &fixture_arg("update_event.json")]);
	assert!(output.status.success(), "info should succeed");

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("kind: update"));
	assert!(stdout.contains("document: /users/alice"));
	assert!(stdout.contains("home: geoPointValue"));
	assert!(stdout.contains("  lastSeen"));
}

#[test]
fn create_event_has_no_old_document() {
	let output = run(&["info", &fixture_arg("create_event.json")]);
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("kind: create"));
	assert!(stdout.contains("old_value:\n  (none)"));
}

#[test]
fn missing_file_reports_error() {
	let output = run(&["decode", &fixture_arg("missing.json")]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: io:"));
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_fcf")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(output.status.success(), "command should succeed");
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn fixture_arg(name: &str) -> String {
	fixture_path(name).display().to_string()
}

fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}
