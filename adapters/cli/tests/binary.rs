use std::{
    fs,
    process::{Command, Output},
};

use tempfile::TempDir;

fn tunnelgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tunnelgen"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tunnelgen binary")
}

fn stdout_of(args: &[&str]) -> String {
    let output = tunnelgen(args);
    assert!(
        output.status.success(),
        "tunnelgen {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf-8 report")
}

#[test]
fn same_seed_prints_identical_reports() {
    let first = stdout_of(&["1.5", "--seed", "4242"]);
    let second = stdout_of(&["1.5", "--seed", "4242"]);
    assert_eq!(first, second);
    assert!(first.starts_with("Generating dry tunnel of length 1.5 miles (7,920 feet)..."));
    assert!(first.contains("Actual Total Length: 7,920 feet"));
}

#[test]
fn json_sections_cover_the_requested_length() {
    let stdout = stdout_of(&["0.5", "--variant", "wet", "--seed", "7", "--format", "json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("json report");

    assert_eq!(report["variant"], "wet");
    assert_eq!(report["requested_length_ft"], 2_640);
    let sections = report["sections"].as_array().expect("sections array");
    assert!(!sections.is_empty());
    let total: u64 = sections
        .iter()
        .map(|section| section["length_ft"].as_u64().expect("section length"))
        .sum();
    assert_eq!(total, 2_640);
    assert_eq!(report["total_length_ft"], 2_640);
}

#[test]
fn text_seeds_are_accepted_and_reproducible() {
    let first = stdout_of(&["0.25", "--seed", "goblin warrens"]);
    let second = stdout_of(&["0.25", "--seed", "goblin warrens"]);
    assert_eq!(first, second);
    assert!(first.contains("Tunnel Generation Complete."));
}

#[test]
fn config_file_supplies_missing_arguments() {
    let dir = TempDir::new().expect("temporary directory");
    let path = dir.path().join("tunnel.toml");
    fs::write(
        &path,
        "[generation]\nlength = 0.25\nseed = 11\nformat = \"json\"\n",
    )
    .expect("write config");
    let config = path.to_str().expect("utf-8 path");

    let from_file = stdout_of(&["--config", config]);
    let from_args = stdout_of(&["0.25", "--seed", "11", "--format", "json"]);
    assert_eq!(from_file, from_args);
}

#[test]
fn malformed_config_exits_with_failure() {
    let dir = TempDir::new().expect("temporary directory");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[generation]\nlenght = 1.0\n").expect("write config");

    let output = tunnelgen(&["--config", path.to_str().expect("utf-8 path")]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid config"));
}

#[test]
fn missing_length_exits_with_failure() {
    let output = tunnelgen(&["--variant", "dry"]);
    assert!(!output.status.success());
}
