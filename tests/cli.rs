use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn cursed(work_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cursed").unwrap();
    cmd.arg("--work-dir").arg(work_dir).env_remove("RUST_LOG");
    cmd
}

fn scratch_dirs(work_dir: &Path) -> usize {
    std::fs::read_dir(work_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("run-"))
        .count()
}

#[test]
fn test_list_shows_grouped_catalog() {
    let temp_dir = tempfile::tempdir().unwrap();
    cursed(temp_dir.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Persistence & Services:"))
        .stdout(predicate::str::contains("regex-json"))
        .stdout(predicate::str::contains("23 demos"));
}

#[test]
fn test_run_by_name_and_day() {
    let temp_dir = tempfile::tempdir().unwrap();
    cursed(temp_dir.path())
        .args(["run", "fizzbuzz", "day17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 01"))
        .stdout(predicate::str::contains("FizzBuzz"))
        .stdout(predicate::str::contains("Day 17"))
        .stdout(predicate::str::contains("Summary of 2 demos:"));
}

#[test]
fn test_unknown_demo_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    cursed(temp_dir.path())
        .args(["run", "quicksort"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Unknown demo: quicksort"));
}

#[test]
fn test_file_demos_clean_up_after_themselves() {
    let temp_dir = tempfile::tempdir().unwrap();
    cursed(temp_dir.path())
        .args(["run", "file-singleton", "linked-disks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Traversing again: [1, 3]"));
    assert_eq!(scratch_dirs(temp_dir.path()), 0);
}

#[test]
fn test_calc_compares_strings_and_floats() {
    let temp_dir = tempfile::tempdir().unwrap();
    cursed(temp_dir.path())
        .args(["calc", "10", "/", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strings: 10 / 4 = 2.5"));

    cursed(temp_dir.path())
        .args(["calc", "1", "/", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("division by zero"));

    cursed(temp_dir.path())
        .args(["calc", "one", "+", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid number"));
}

#[test]
fn test_json_age_and_api() {
    let temp_dir = tempfile::tempdir().unwrap();
    cursed(temp_dir.path())
        .args(["json", r#"{"a": [1, 2]}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("They agree."));

    cursed(temp_dir.path())
        .args(["age", "-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Age cannot be negative!"))
        .stdout(predicate::str::contains("Age must be between 0 and 150!"));

    cursed(temp_dir.path())
        .args([
            "api",
            r#"{"action":"create","id":"1","name":"x"}"#,
            r#"{"action":"delete","id":"9"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> 200"))
        .stdout(predicate::str::contains("-> 404"));
}

#[test]
fn test_config_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    cursed(temp_dir.path())
        .args(["config", "precision", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("precision set to 8"));

    cursed(temp_dir.path())
        .args(["config", "precision"])
        .assert()
        .success()
        .stdout(predicate::str::contains("precision = 8"));

    cursed(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("precision = 8"))
        .stdout(predicate::str::contains("seed = 42"));

    cursed(temp_dir.path())
        .args(["config", "pool-workers", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("must be greater than zero"));
}

#[test]
fn test_home_env_sets_work_dir() {
    let temp_dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("cursed")
        .unwrap()
        .env("CURSED_HOME", temp_dir.path())
        .args(["config", "seed", "7"])
        .assert()
        .success();
    assert!(temp_dir.path().join("config.json").exists());
}

#[test]
fn test_deeply_nested_json_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let deep = format!("{}{}", "[".repeat(20_000), "]".repeat(20_000));
    cursed(temp_dir.path())
        .args(["json", &deep])
        .assert()
        .success()
        .stdout(predicate::str::contains("maximum recursion depth exceeded"))
        .stdout(predicate::str::contains("Neither accepts it."));
}

#[test]
fn test_json_output_is_machine_readable() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = cursed(temp_dir.path())
        .args(["--json", "run", "hello-world"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["demo"], "hello-world");
    assert!(parsed[0]["output"].as_array().is_some_and(|o| !o.is_empty()));
}

#[test]
fn test_grouped_help() {
    let temp_dir = tempfile::tempdir().unwrap();
    cursed(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Try It Yourself:"))
        .stdout(predicate::str::contains("--work-dir"));
}
