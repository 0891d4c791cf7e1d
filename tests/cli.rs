//! The `fib-compare` binary as a user runs it.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fib_compare(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fib-compare").unwrap();
    cmd.current_dir(cwd).env_remove("FIB_COMPARE_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    fib_compare(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compare Fibonacci benchmark runs"));
}

#[test]
fn test_render_empty_directory_reports_no_data() {
    let dir = TempDir::new().unwrap();
    fib_compare(dir.path())
        .arg("--data-dir")
        .arg(dir.path())
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .dat files found!"))
        .stderr(predicate::str::contains("panicked").not());

    assert!(!dir.path().join("fibonacci.html").exists());
}

#[test]
fn test_no_data_respects_extension_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("m1.dat"), "0|0.0001s|8B\n").unwrap();

    fib_compare(dir.path())
        .args(["--extension", "bench", "methods"])
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .bench files found!"));
}

#[test]
fn test_render_writes_chart() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("m1.dat"), "0|0.0001s|8B\n1|0.0002s|16B\n").unwrap();
    fs::write(dir.path().join("m2.dat"), "0|0.0005s|8B\n").unwrap();
    let output = dir.path().join("chart.json");

    fib_compare(dir.path())
        .arg("--data-dir")
        .arg(dir.path())
        .args(["render", "--format", "json", "--methods", "m2", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let values = doc["data"]["values"].as_array().unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["Method"], "m2");
}

#[test]
fn test_malformed_file_names_the_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.dat"), "0|0.0001s\n").unwrap();

    fib_compare(dir.path())
        .arg("--data-dir")
        .arg(dir.path())
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("broken.dat"));
}
