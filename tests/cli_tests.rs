//! Integration tests for the CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .join("package.json")
}

fn dep_health() -> Command {
    let mut cmd = Command::cargo_bin("dep-health").unwrap();
    cmd.env_remove("INPUT_PACKAGES")
        .env_remove("GITHUB_ACTIONS")
        .env_remove("GITHUB_TOKEN");
    cmd
}

/// Config file pointing every API at a mock server
fn mock_config(base_url: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[network]\nnpm_downloads_api = \"{0}\"\nnpm_registry_api = \"{0}\"\ngithub_api = \"{0}\"\nmax_retries = 0\nrequest_delay_ms = 1\n",
        base_url
    )
    .unwrap();
    file
}

#[test]
fn test_cli_help() {
    dep_health()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Check npm dependencies"));
}

#[test]
fn test_cli_empty_manifest_succeeds() {
    dep_health()
        .arg("--manifest")
        .arg(fixture("no_dependencies"))
        .arg("--output")
        .arg("github")
        .assert()
        .success()
        .stdout(predicate::str::contains("No packages to check."));
}

#[test]
fn test_cli_missing_manifest_fails() {
    dep_health()
        .arg("--manifest")
        .arg("/nonexistent/package.json")
        .arg("--output")
        .arg("github")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::Failed to read manifest"));
}

#[test]
fn test_cli_ignore_everything_succeeds() {
    dep_health()
        .arg("--manifest")
        .arg(fixture("sample_project"))
        .args(["--ignore", "express", "--ignore", "left-pad", "--ignore", "vitest"])
        .arg("--output")
        .arg("github")
        .assert()
        .success()
        .stdout(predicate::str::contains("No packages to check."));
}

#[test]
fn test_cli_reports_against_mock_apis() {
    let mut server = mockito::Server::new();
    let _downloads_a = server
        .mock("GET", "/downloads/point/last-week/a")
        .with_status(404)
        .create();
    let _registry_a = server.mock("GET", "/a").with_status(404).create();
    let _downloads_b = server
        .mock("GET", "/downloads/point/last-week/b")
        .with_status(200)
        .with_body(r#"{"downloads":123456,"package":"b"}"#)
        .create();
    let _registry_b = server
        .mock("GET", "/b")
        .with_status(200)
        .with_body(r#"{"name":"b"}"#)
        .create();

    let config = mock_config(&server.url());

    dep_health()
        .arg("--config")
        .arg(config.path())
        .env("INPUT_PACKAGES", "a, b")
        .arg("--output")
        .arg("github")
        .assert()
        .success()
        .stdout(predicate::str::contains("::warning::❌ \"a\""))
        .stdout(predicate::str::contains("\"b\": 123,456 weekly downloads (very popular)"))
        .stdout(predicate::str::contains("::warning::⚠️ \"b\": no repository info"));
}

#[test]
fn test_cli_fail_on_warning() {
    let mut server = mockito::Server::new();
    let _downloads = server
        .mock("GET", "/downloads/point/last-week/tiny")
        .with_status(200)
        .with_body(r#"{"downloads":12,"package":"tiny"}"#)
        .create();
    let _registry = server
        .mock("GET", "/tiny")
        .with_status(200)
        .with_body(r#"{"name":"tiny"}"#)
        .create();

    let config = mock_config(&server.url());
    let report = tempfile::NamedTempFile::new().unwrap();

    dep_health()
        .arg("--config")
        .arg(config.path())
        .args(["--packages", "tiny", "--fail-on-warning", "--output", "github"])
        .arg("--report")
        .arg(report.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("low usage"))
        .stdout(predicate::str::contains("::error::2 warnings reported"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(report.path()).unwrap()).unwrap();
    assert_eq!(json["summary"]["low_usage"], 1);
    assert_eq!(json["packages"][0]["name"], "tiny");
}

#[test]
#[ignore] // Requires network access
fn test_cli_sample_project_live() {
    dep_health()
        .arg("--manifest")
        .arg(fixture("sample_project"))
        .assert()
        .success()
        .stdout(predicate::str::contains("express"));
}
