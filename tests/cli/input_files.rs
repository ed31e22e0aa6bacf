// tests/cli/input_files.rs
use crate::common::{SalesFile, grouped, unsorted};
use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_control_break"))
}

#[test]
fn unsorted_input_reports_contiguity_error() {
    let file = SalesFile::new(&unsorted());
    bin()
        .arg("--input")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to build sales report"))
        .stderr(predicate::str::contains("Input is not grouped"))
        .stderr(predicate::str::contains("level: 0 (dept)"))
        .stderr(predicate::str::contains("Suggestion:"));
}

#[test]
fn sort_flag_fixes_unsorted_input() {
    let file = SalesFile::new(&unsorted());
    bin()
        .arg("--input")
        .arg(file.path())
        .arg("--sort")
        .assert()
        .success()
        .stdout(predicate::str::contains("総売上: 325,000円"));
}

#[test]
fn details_and_negative_amounts() {
    let file = SalesFile::new(&grouped());
    bin()
        .arg("--input")
        .arg(file.path())
        .arg("--details")
        .assert()
        .success()
        .stdout(predicate::str::contains("    2024-01-01: -100円 (1個)"))
        .stdout(predicate::str::contains("部門売上合計: 200円"))
        .stdout(predicate::str::contains("総売上: 500円"));
}

#[test]
fn empty_file_prints_zero_totals() {
    let file = SalesFile::raw("[]");
    bin()
        .arg("--input")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("総売上: 0円"));
}

#[test]
fn malformed_json_is_reported() {
    let file = SalesFile::raw("{ not json");
    bin()
        .arg("--input")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn missing_file_is_reported() {
    bin()
        .args(["--input", "definitely/missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
