// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the repopulse CLI commands that need no network

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Fixed evaluation instant used by every classify test
const NOW: &str = "2025-06-01T00:00:00Z";

/// A repopulse command isolated from the caller's environment
fn repopulse() -> Command {
    let mut cmd = Command::cargo_bin("repopulse").unwrap();
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("REPOPULSE_CONFIG")
        .env_remove("REPOPULSE_API_URL")
        .env_remove("REPOPULSE_TOKEN")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

/// Run `classify` at [`NOW`] with extra arguments
fn classify(args: &[&str]) -> assert_cmd::assert::Assert {
    repopulse()
        .args(["classify", "--now", NOW])
        .args(args)
        .assert()
}

/// Helper to get stdout as string
fn stdout_str(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_classify_stagnant_scenario() {
    // 200 days before NOW
    classify(&["--updated-at", "2024-11-13T00:00:00Z", "--maintainer-tier", "some-activity"])
        .success()
        .stdout(predicate::str::contains("Repository Status: Stagnant (matched: Live, Stagnant)"));
}

#[test]
fn test_classify_live_scenario() {
    classify(&["--updated-at", "2025-05-22T00:00:00Z", "--commits", "3"])
        .success()
        .stdout(predicate::str::contains("Repository Status: Live (matched: Live)"));
}

#[test]
fn test_classify_archived_is_dead() {
    classify(&[
        "--archived",
        "--updated-at",
        "2025-05-31T00:00:00Z",
        "--commits",
        "12",
        "--maintainer-tier",
        "active",
    ])
    .success()
    .stdout(predicate::str::contains("Repository Status: Dead (matched: Dead)"));
}

#[test]
fn test_classify_unmatched_exits_with_unclassified_code() {
    // 100 days before NOW: too old for Live, too new for Dead, no maintainer.
    classify(&["--updated-at", "2025-02-21T00:00:00Z"])
        .code(3)
        .stdout(predicate::str::contains("Repository Status: Unclassified (matched: none)"));
}

#[test]
fn test_classify_rejects_malformed_timestamp() {
    classify(&["--updated-at", "last tuesday"])
        .code(1)
        .stderr(predicate::str::contains("invalid input: updated_at"));
}

#[test]
fn test_classify_rejects_unknown_tier() {
    classify(&["--updated-at", "2025-05-22T00:00:00Z", "--maintainer-tier", "dormant"])
        .code(2)
        .stderr(predicate::str::contains("unknown activity tier"));
}

#[test]
fn test_classify_json_output() {
    let output = repopulse()
        .args(["--json", "classify", "--now", NOW, "--updated-at", "2024-11-13T00:00:00Z"])
        .args(["--maintainer-tier", "inactive"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout_str(&output)).unwrap();
    assert_eq!(value["status"], "Stagnant");
    assert_eq!(value["matched"], serde_json::json!(["Live", "Stagnant"]));
    assert_eq!(value["evaluated_at"], "2025-06-01T00:00:00Z");
}

#[test]
fn test_config_shows_file_values_and_redacts_token() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "api_url = \"http://127.0.0.1:1\"\ntoken = \"ghp_topsecret\"\ncontributor_limit = 3\n",
    )
    .unwrap();

    let output = repopulse()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = stdout_str(&output);
    assert!(stdout.contains("api_url = \"http://127.0.0.1:1\""));
    assert!(stdout.contains("contributor_limit = 3"));
    assert!(stdout.contains("<redacted>"));
    assert!(!stdout.contains("ghp_topsecret"));
}

#[test]
fn test_config_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "timeout_secs = 5\ncontributor_limit = 3\n").unwrap();

    let output = repopulse()
        .env("REPOPULSE_TIMEOUT_SECS", "7")
        .arg("--json")
        .arg("--config")
        .arg(&path)
        .arg("config")
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_str(&stdout_str(&output)).unwrap();
    assert_eq!(config["timeout_secs"], 7);
    assert_eq!(config["contributor_limit"], 3);
}

#[test]
fn test_config_without_file_says_none() {
    let dir = TempDir::new().unwrap();
    repopulse()
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("# config file: (none)"));
}

#[test]
fn test_config_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    repopulse()
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("config")
        .assert()
        .failure();
}

#[test]
fn test_analyze_rejects_non_github_url() {
    repopulse()
        .args(["analyze", "https://gitlab.com/owner/repo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a GitHub repository URL"));
}

#[test]
fn test_completions_bash() {
    repopulse()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("repopulse"));
}
