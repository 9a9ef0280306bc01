//! Integration tests for the repo-analyzer CLI

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary, isolated from the caller's credentials, `.env` and config
fn analyzer(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("repo-analyzer"));
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("BITBUCKET_USERNAME")
        .env_remove("BITBUCKET_APP_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("repo-analyzer"));
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("BITBUCKET_APP_PASSWORD"));
}

#[test]
fn test_no_command_exits_1() {
    let home = TempDir::new().unwrap();
    analyzer(&home).assert().code(1).stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_command_exits_1() {
    let home = TempDir::new().unwrap();
    analyzer(&home).arg("audit").assert().code(1);
}

#[test]
fn test_check_requires_org() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .args(["check", "aws-sdk"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--org"));
}

#[test]
fn test_check_without_credentials_aborts() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .args(["check", "aws-sdk", "--org=acme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BITBUCKET_USERNAME"));

    assert!(!home.path().join("output").exists());
}

#[test]
fn test_credentials_from_dotenv_then_unknown_check() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".env"),
        "BITBUCKET_USERNAME=ci\nBITBUCKET_APP_PASSWORD=secret\n",
    )
    .unwrap();

    analyzer(&home)
        .args(["check", "licenses", "--org", "acme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown check: licenses"))
        .stderr(predicate::str::contains("aws-sdk"));
}

#[test]
fn test_verbose_enables_debug_logging() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".env"),
        "BITBUCKET_USERNAME=ci\nBITBUCKET_APP_PASSWORD=secret\n",
    )
    .unwrap();

    analyzer(&home)
        .args(["check", "licenses", "--org", "acme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Loaded environment from").not());

    analyzer(&home)
        .args(["--verbose", "check", "licenses", "--org", "acme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Loaded environment from"));
}

#[test]
fn test_count_without_credentials_aborts() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .args(["count", "--org=acme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BITBUCKET_APP_PASSWORD"));
}

#[test]
fn test_checks_lists_builtin_checks() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .arg("checks")
        .assert()
        .success()
        .stdout(predicate::str::contains("aws-sdk"))
        .stdout(predicate::str::contains("react-native-version"))
        .stdout(predicate::str::contains("secrets"));
}

#[test]
fn test_checks_json() {
    let home = TempDir::new().unwrap();
    let output = analyzer(&home).args(["checks", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = json["checks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["aws-sdk", "keyword", "react-native-version", "react-version", "secrets"]
    );
}
