// tests/cli/smoke_tests.rs
use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_control_break"))
}

#[test]
fn shows_help() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("control_break"))
        .stdout(predicate::str::contains("--generate"));
}

#[test]
fn prints_sample_report() {
    bin()
        .assert()
        .success()
        .stdout(predicate::str::contains("【 営業部 】"))
        .stdout(predicate::str::contains("部門売上合計: 459,000円"))
        .stdout(predicate::str::contains("総売上: 1,092,000円"));
}

#[test]
fn sample_report_as_json() {
    let output = bin().args(["--format", "json", "--stats"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["departments"].as_array().unwrap().len(), 3);
    assert_eq!(value["statistics"][0]["median"], 109_000.0);
}

#[test]
fn generated_data_is_reproducible() {
    let run = || bin().args(["--generate", "2000", "--seed", "7", "--stats", "-j", "4"]).output().unwrap();
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(String::from_utf8_lossy(&first.stdout).contains("統計情報"));
}

#[test]
fn rejects_conflicting_sources() {
    bin()
        .args(["--generate", "10", "--input", "sales.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn rejects_zero_records() {
    bin().args(["--generate", "0"]).assert().failure();
}
