//! Basic CLI smoke tests.
//!
//! Only argument parsing is exercised here; commands that touch the data
//! directory are covered by the core integration tests against in-memory
//! storage.

use std::process::Command;

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "nocrastination-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed");
    assert!(stdout.contains("seed"));
    assert!(stdout.contains("stats"));
}

#[test]
fn test_seed_help() {
    let (stdout, _, code) = run_cli(&["seed", "--help"]);
    assert_eq!(code, 0, "seed help failed");
    assert!(stdout.contains("run"));
    assert!(stdout.contains("wipe"));
}

#[test]
fn test_unknown_command_fails() {
    let (_, _, code) = run_cli(&["definitely-not-a-command"]);
    assert_ne!(code, 0);
}
