//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary and verify its output.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    run_cli_with_stdin(args, "")
}

fn run_cli_with_stdin(args: &[&str], input: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomogame"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_catalog_lists_seven_characters() {
    let (stdout, _, code) = run_cli(&["catalog", "--points", "500"]);
    assert_eq!(code, 0, "catalog failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[2]["id"], "astronaut");
    assert_eq!(rows[2]["affordable"], true);
    assert_eq!(rows[3]["affordable"], false);
    assert_eq!(rows[0]["selected"], true);
}

#[test]
fn test_simulate_is_reproducible() {
    let args = ["simulate", "--seed", "5", "--pomodoros", "4", "--tasks", "4"];
    let (first, _, code) = run_cli(&args);
    assert_eq!(code, 0, "simulate failed");
    let (second, _, _) = run_cli(&args);

    let a: serde_json::Value = serde_json::from_str(&first).unwrap();
    let b: serde_json::Value = serde_json::from_str(&second).unwrap();
    assert_eq!(a["points"], b["points"]);
    assert_eq!(a["pomodoros_completed"], 4);
    assert_eq!(a["mode"], "work");
    assert_eq!(a["tasks"].as_array().unwrap().len(), 16);
}

#[test]
fn test_config_show_defaults() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    assert!(stdout.contains("work_secs = 1500"));
    assert!(stdout.contains("reveal_delay_ms = 2000"));
}

#[test]
fn test_config_check_missing_file_fails() {
    let (_, stderr, code) = run_cli(&["config", "check", "/nonexistent/pomogame.toml"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_play_reads_commands_until_eof() {
    let (stdout, _, code) = run_cli_with_stdin(
        &["play", "--seed", "1"],
        "add Write report\ntasks\nbuy ninja\nstatus\nquit\n",
    );
    assert_eq!(code, 0, "play failed");
    assert!(stdout.contains("Write report"));
    assert!(stdout.contains("(nothing happened)"));
    assert!(stdout.contains("25:00 Focus Time [paused]"));
}

#[test]
fn test_play_json_events() {
    let (stdout, _, code) = run_cli_with_stdin(&["play", "--json"], "add Read\nskip\n");
    assert_eq!(code, 0, "play --json failed");
    let types: Vec<String> = stdout
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .filter_map(|v| v["type"].as_str().map(str::to_string))
        .collect();
    assert_eq!(types, vec!["task_added", "timer_skipped"]);
}

#[test]
fn test_completions() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("pomogame"));
}
