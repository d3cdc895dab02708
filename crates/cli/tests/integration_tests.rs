#![allow(unused_crate_dependencies)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Helper to get a bundled fixture from the model crate
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../model/testdata")
        .join(name)
}

/// Helper to create a netlist file with the given extension
fn netlist_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Helper to get the bnmodel binary
fn bnmodel_cmd() -> Command {
    Command::cargo_bin("bnmodel").unwrap()
}

#[test]
fn test_help_command() {
    bnmodel_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Boolean network inspector"));
}

#[test]
fn test_version_command() {
    bnmodel_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bnmodel"));
}

#[test]
fn test_info_blif() {
    bnmodel_cmd()
        .arg("info")
        .arg(fixture("s27.blif"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Format: BLIF"))
        .stdout(predicate::str::contains("Name: s27"))
        .stdout(predicate::str::contains("Inputs: 4"))
        .stdout(predicate::str::contains("Outputs: 1"))
        .stdout(predicate::str::contains("Seqs: 3"))
        .stdout(predicate::str::contains("Logic: 10"));
}

#[test]
fn test_info_bench() {
    bnmodel_cmd()
        .arg("info")
        .arg(fixture("s27.bench"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Format: ISCAS89 bench"))
        .stdout(predicate::str::contains("Logic: 10"))
        .stdout(predicate::str::contains("Funcs: 5"));
}

#[test]
fn test_info_aag_with_explicit_format() {
    let file = netlist_file("aag 3 1 1 1 1\n2\n4 6\n4\n6 2 5\n", ".txt");
    bnmodel_cmd()
        .arg("info")
        .arg(file.path())
        .args(["--format", "aag", "--clock-name", "ck"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inputs: 3"))
        .stdout(predicate::str::contains("Seqs: 1"));
}

#[test]
fn test_info_aig() {
    bnmodel_cmd()
        .arg("info")
        .arg(fixture("test1.aig"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Format: binary AIGER"))
        .stdout(predicate::str::contains("Inputs: 3"))
        .stdout(predicate::str::contains("Comment: y = a & b & !c"));
}

#[test]
fn test_eval_truth() {
    bnmodel_cmd()
        .arg("eval")
        .arg(fixture("fadder.truth"))
        .args(["--inputs", "110"])
        .assert()
        .success()
        .stdout(predicate::str::contains("outputs: 01"));
}

#[test]
fn test_print() {
    bnmodel_cmd()
        .arg("print")
        .arg(fixture("s27.blif"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Name: s27\n"))
        .stdout(predicate::str::contains("O#0: G17 = "))
        .stdout(predicate::str::contains("DFF"));
}

#[test]
fn test_eval_s27() {
    bnmodel_cmd()
        .arg("eval")
        .arg(fixture("s27.bench"))
        .args(["--inputs", "0000", "--state", "000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("outputs: 1"))
        .stdout(predicate::str::contains("next state: 000"));
}

#[test]
fn test_eval_wrong_length() {
    bnmodel_cmd()
        .arg("eval")
        .arg(fixture("s27.blif"))
        .args(["--inputs", "00", "--state", "000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 4 input values, got 2"));
}

#[test]
fn test_eval_bad_bits() {
    bnmodel_cmd()
        .arg("eval")
        .arg(fixture("s27.blif"))
        .args(["--inputs", "01x0", "--state", "000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("found 'x'"));
}

#[test]
fn test_unknown_extension() {
    let file = netlist_file(".model m\n.end\n", ".txt");
    bnmodel_cmd()
        .arg("info")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot infer the format"));
}

#[test]
fn test_parse_error_reported() {
    bnmodel_cmd()
        .arg("info")
        .arg(fixture("broken.blif"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"))
        .stderr(predicate::str::contains("'c' is not defined"));
}

#[test]
fn test_nonexistent_file() {
    bnmodel_cmd()
        .arg("info")
        .arg("nonexistent.blif")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent.blif"));
}
