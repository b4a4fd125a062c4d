//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temporary data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitual"))
        .args(args)
        .env("HABITUAL_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command and expect success.
fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\nstderr: {stderr}");
    stdout
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

/// Add an everyday habit running from 2024-01-15 to `end`.
fn add_everyday(data_dir: &Path, name: &str, end: &str) {
    run_cli_success(
        data_dir,
        &[
            "--date", "2024-01-15", "habit", "add", name, "--frequency", "everyday",
            "--minutes", "30", "--end", end,
        ],
    );
}

#[test]
fn test_habit_add_and_list() {
    let dir = TempDir::new().unwrap();
    add_everyday(dir.path(), "Read", "2024-01-24");

    let stdout = run_cli_success(dir.path(), &["--date", "2024-01-15", "habit", "list"]);
    let habits = parse_json(&stdout);
    let habits = habits.as_array().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["name"], "Read");
    assert_eq!(habits[0]["lifecycle"], "active");
    assert!(habits[0]["color"].as_str().unwrap().starts_with('#'));
}

#[test]
fn test_habit_add_prints_json_only() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &[
            "--date", "2024-01-15", "habit", "add", "Walk", "--frequency", "weekly",
            "--days", "Mon,Wed", "--hours", "1", "--end", "2024-02-15",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    let habit = parse_json(&stdout);
    assert_eq!(habit["name"], "Walk");
    assert_eq!(habit["days_of_week"], serde_json::json!(["Monday", "Wednesday"]));
    assert!(stderr.contains("Habit added: Walk"));
}

#[test]
fn test_habit_add_validation_error() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "--date", "2024-01-15", "habit", "add", "Run", "--frequency", "weekly",
            "--hours", "1", "--end", "2024-02-15",
        ],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("at least one day"), "stderr: {stderr}");
}

#[test]
fn test_habit_add_start_in_past() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "--date", "2024-01-15", "habit", "add", "Run", "--frequency", "everyday",
            "--hours", "1", "--start", "2024-01-10", "--end", "2024-02-15",
        ],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("cannot be in the past"), "stderr: {stderr}");
}

#[test]
fn test_duplicate_habit_rejected() {
    let dir = TempDir::new().unwrap();
    add_everyday(dir.path(), "Read", "2024-01-24");
    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "--date", "2024-01-15", "habit", "add", "Read", "--frequency", "everyday",
            "--minutes", "15", "--end", "2024-01-30",
        ],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");
}

#[test]
fn test_complete_and_progress() {
    let dir = TempDir::new().unwrap();
    add_everyday(dir.path(), "Read", "2024-01-24");

    for day in ["2024-01-15", "2024-01-16", "2024-01-17"] {
        run_cli_success(dir.path(), &["--date", day, "complete", "Read"]);
    }
    let stdout = run_cli_success(dir.path(), &["--date", "2024-01-17", "complete", "Read"]);
    assert!(stdout.contains("Already completed"));

    let all = parse_json(&run_cli_success(dir.path(), &["progress", "all"]));
    assert_eq!(all[0]["percentage"], 30.0);
    assert_eq!(all[0]["completed_days"], 3);
    assert_eq!(all[0]["total_days"], 10);

    let today = parse_json(&run_cli_success(
        dir.path(),
        &["--date", "2024-01-17", "progress", "today"],
    ));
    assert_eq!(today[0]["is_completed_today"], true);

    let finished = parse_json(&run_cli_success(dir.path(), &["progress", "finished"]));
    assert!(finished.as_array().unwrap().is_empty());
}

#[test]
fn test_complete_unknown_habit_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["complete", "Ghost"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Habit not found"));
}

#[test]
fn test_delete_prunes_completions() {
    let dir = TempDir::new().unwrap();
    add_everyday(dir.path(), "Read", "2024-01-24");
    run_cli_success(dir.path(), &["--date", "2024-01-15", "complete", "Read"]);
    run_cli_success(dir.path(), &["habit", "delete", "Read"]);

    let export = parse_json(&run_cli_success(dir.path(), &["data", "export"]));
    assert!(export["habits"].as_array().unwrap().is_empty());
    assert!(export["ledger"].as_object().unwrap().is_empty());
}

#[test]
fn test_calendar_month() {
    let dir = TempDir::new().unwrap();
    add_everyday(dir.path(), "Read", "2024-01-24");
    let view = parse_json(&run_cli_success(
        dir.path(),
        &["--date", "2024-01-15", "calendar"],
    ));
    assert_eq!(view["year"], 2024);
    assert_eq!(view["month"], 1);
    assert_eq!(view["leading_blanks"], 1);
    assert_eq!(view["days"][14]["habits"][0], "Read");
    assert!(view["days"][13]["habits"].as_array().unwrap().is_empty());

    let next = parse_json(&run_cli_success(
        dir.path(),
        &["--date", "2024-01-15", "calendar", "--offset", "-1"],
    ));
    assert_eq!(next["year"], 2023);
    assert_eq!(next["month"], 12);
}

#[test]
fn test_remind_respects_config() {
    let dir = TempDir::new().unwrap();
    add_everyday(dir.path(), "Read", "2024-01-24");

    let stdout = run_cli_success(dir.path(), &["--date", "2024-01-16", "remind"]);
    assert!(stdout.contains("Reminder: Read"));

    run_cli_success(dir.path(), &["config", "set", "reminders.enabled", "false"]);
    let stdout = run_cli_success(dir.path(), &["--date", "2024-01-16", "remind"]);
    assert!(stdout.is_empty());
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(dir.path(), &["config", "get", "ui.dark_mode"]);
    assert_eq!(stdout.trim(), "true");

    run_cli_success(dir.path(), &["config", "set", "ui.dark_mode", "false"]);
    let stdout = run_cli_success(dir.path(), &["config", "get", "ui.dark_mode"]);
    assert_eq!(stdout.trim(), "false");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "ui.nope", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_assess_scores() {
    let dir = TempDir::new().unwrap();
    let result = parse_json(&run_cli_success(
        dir.path(),
        &["assess", "--answers", "yyynyyyynyyyyny"],
    ));
    let scores = result["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 5);
    assert_eq!(result["suggested_categories"][0], "Learning");
}

#[test]
fn test_export_import_roundtrip() {
    let dir = TempDir::new().unwrap();
    add_everyday(dir.path(), "Read", "2024-01-24");
    run_cli_success(dir.path(), &["--date", "2024-01-15", "complete", "Read"]);
    let exported = run_cli_success(dir.path(), &["data", "export"]);

    let other = TempDir::new().unwrap();
    let file = other.path().join("snapshot.json");
    std::fs::write(&file, &exported).unwrap();
    run_cli_success(other.path(), &["data", "import", file.to_str().unwrap()]);

    let reexported = run_cli_success(other.path(), &["data", "export"]);
    assert_eq!(parse_json(&reexported), parse_json(&exported));
}
