//! Tests for the `sbirka-structurer` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture() -> &'static Path {
    Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/ochrana_udaju/input.txt"
    ))
}

fn pdf_fixture() -> &'static Path {
    Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/ochrana_udaju_pdf/input.pdf"
    ))
}

fn structurer() -> Command {
    cargo_bin_cmd!("sbirka-structurer")
}

#[test]
fn test_help_lists_subcommands() {
    structurer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("file"));
}

#[test]
fn test_file_command_writes_json() {
    let dir = tempdir().unwrap();

    structurer()
        .args(["file", fixture().to_str().unwrap(), "--output"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("101/2000 Sb."))
        .stdout(predicate::str::contains("Saved to:"));

    let content = fs::read_to_string(dir.path().join("input.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["metadata"]["law_id"], "101/2000 Sb.");
    assert_eq!(value["structured_text"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_file_command_reads_pdf() {
    let dir = tempdir().unwrap();

    structurer()
        .args(["file", pdf_fixture().to_str().unwrap(), "--output"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("101/2000 Sb."))
        .stdout(predicate::str::contains("heads: 2"));

    let content = fs::read_to_string(dir.path().join("input.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["metadata"]["source_file"], "input.pdf");
    assert_eq!(value["structured_text"][1]["identifier"], "HEAD II");
}

#[test]
fn test_process_command_identifier_collision() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data");
    let output = dir.path().join("out");
    fs::create_dir(&input).unwrap();
    fs::copy(fixture(), input.join("novela.txt")).unwrap();
    fs::copy(pdf_fixture(), input.join("puvodni.pdf")).unwrap();

    structurer()
        .arg("process")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--name-by", "identifier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed: 2"));

    assert!(output.join("101_2000_sb.json").exists());
    assert!(output.join("101_2000_sb-2.json").exists());
}

#[test]
fn test_file_command_missing_document() {
    let dir = tempdir().unwrap();

    structurer()
        .args(["file", "does-not-exist.txt", "--output"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_process_command_yaml_by_identifier() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data");
    let output = dir.path().join("out");
    fs::create_dir(&input).unwrap();
    fs::copy(fixture(), input.join("zakon.txt")).unwrap();

    structurer()
        .arg("process")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--format", "yaml", "--name-by", "identifier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed: 1"));

    let content = fs::read_to_string(output.join("101_2000_sb.yaml")).unwrap();
    assert!(content.starts_with("---\n"));
}

#[test]
fn test_process_command_continues_past_failure() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data");
    let output = dir.path().join("out");
    fs::create_dir(&input).unwrap();
    fs::copy(fixture(), input.join("a.txt")).unwrap();
    fs::write(input.join("b.txt"), [0xff, 0xfe, 0xfd]).unwrap();

    structurer()
        .arg("process")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed: 1"))
        .stdout(predicate::str::contains("Failed: 1"));

    assert!(output.join("a.json").exists());

    structurer()
        .arg("process")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 documents failed"));
}

#[test]
fn test_process_command_missing_input_dir() {
    let dir = tempdir().unwrap();

    structurer()
        .arg("process")
        .arg("--input")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
