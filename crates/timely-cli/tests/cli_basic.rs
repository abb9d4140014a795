//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Only
//! read-only commands are exercised here so the suite never touches the
//! user's data directory.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "timely-cli", "--"])
        .args(args)
        .env("TIMELY_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn help_lists_command_groups() {
    let (stdout, stderr, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed: {stderr}");
    for group in ["project", "task", "today", "goal", "remind", "settings", "backup"] {
        assert!(stdout.contains(group), "help missing '{group}': {stdout}");
    }
}

#[test]
fn template_list_returns_valid_json() {
    let (stdout, stderr, code) = run_cli(&["template", "list"]);
    assert_eq!(code, 0, "template list failed: {stderr}");

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("template list did not print JSON");
    let templates = parsed.as_array().expect("expected a JSON array");
    assert_eq!(templates.len(), 4);
    assert!(templates.iter().any(|t| t["name"] == "Read a Book"));
}
