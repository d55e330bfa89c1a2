//! Integration tests for the jsonmask binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DOCUMENT: &str = r#"{"user": "ann", "password": "hunter2", "pin": 1234, "admin": true}"#;

fn jsonmask() -> Command {
    let mut cmd = Command::new(cargo_bin("jsonmask"));
    cmd.env_remove("JSONMASK_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn setup_config(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("mask.yml"), config).unwrap();
    temp
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    jsonmask()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_DESCRIPTION")));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    jsonmask()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_masks_stdin() -> Result<(), Box<dyn std::error::Error>> {
    jsonmask()
        .args(["mask", "--mask-keys", "password,pin,admin"])
        .write_stdin(DOCUMENT)
        .assert()
        .success()
        .stdout(r#"{"user": "ann", "password": "***", "pin": 8888, "admin": "&&&"}"#);
    Ok(())
}

#[test]
fn cli_masks_file_argument() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let input = temp.path().join("doc.json");
    fs::write(&input, DOCUMENT)?;

    jsonmask()
        .arg("mask")
        .arg(&input)
        .args(["--allow-keys", "user", "--mask-strings-with", "[redacted]"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""user": "ann""#))
        .stdout(predicate::str::contains(r#""password": "[redacted]""#))
        .stdout(predicate::str::contains(r#""pin": 8888"#));
    Ok(())
}

#[test]
fn cli_no_subcommand_uses_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_config("mask_keys: [password]\n");

    jsonmask()
        .arg("--config")
        .arg(temp.path().join("mask.yml"))
        .write_stdin(DOCUMENT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""password": "***""#))
        .stdout(predicate::str::contains(r#""pin": 1234"#));
    Ok(())
}

#[test]
fn cli_reads_config_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_config("mask_keys: [pin]\n");

    jsonmask()
        .env("JSONMASK_CONFIG", temp.path().join("mask.yml"))
        .arg("mask")
        .write_stdin(DOCUMENT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""pin": 8888"#));
    Ok(())
}

#[test]
fn cli_writes_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = temp.path().join("out.json");

    jsonmask()
        .args(["mask", "--mask-paths", "$.password", "--output"])
        .arg(&output)
        .write_stdin(DOCUMENT)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&output)?;
    assert!(written.contains(r#""password": "***""#));
    Ok(())
}

#[test]
fn cli_config_error_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    jsonmask()
        .args(["mask", "--mask-keys", "a", "--allow-keys", "b"])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be combined"));
    Ok(())
}

#[test]
fn cli_missing_targets_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    jsonmask()
        .arg("mask")
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
    Ok(())
}

#[test]
fn cli_invalid_json_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    jsonmask()
        .args(["mask", "--mask-keys", "a"])
        .write_stdin(r#"{"a": "open"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unterminated string at index 6"));
    Ok(())
}

#[test]
fn cli_check_config_reports_algorithm() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_config("mask_keys: [a]\nmask_json_paths: [\"$.b[*]\"]\n");

    jsonmask()
        .arg("check-config")
        .arg(temp.path().join("mask.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("1 keys, 1 JSON paths"))
        .stdout(predicate::str::contains("radix-trie"));
    Ok(())
}

#[test]
fn cli_check_config_rejects_bad_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_config("mask_json_paths: [\"b.c\"]\n");

    jsonmask()
        .arg("check-config")
        .arg(temp.path().join("mask.yml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid JSON path"));
    Ok(())
}

#[test]
fn cli_debug_logs_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    jsonmask()
        .args(["--debug", "mask", "--mask-keys", "pin"])
        .write_stdin(DOCUMENT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""pin": 8888"#))
        .stderr(predicate::str::contains("built json masker"));
    Ok(())
}

#[test]
fn cli_generates_completions() -> Result<(), Box<dyn std::error::Error>> {
    jsonmask()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jsonmask"));
    Ok(())
}
