#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("shows"))
        .stdout(predicate::str::contains("details"))
        .stdout(predicate::str::contains("browse"));
}

#[test]
fn test_shows_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.args(["shows", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--search"))
        .stdout(predicate::str::contains("--rating"))
        .stdout(predicate::str::contains("--max-pages"));
}

#[test]
fn test_shows_invalid_rating() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.args(["shows", "--rating", "seven"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid rating filter"));
}

#[test]
fn test_shows_invalid_page() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.args(["shows", "--page", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--page"));
}

#[test]
fn test_details_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.arg("details")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_details_non_numeric_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.args(["details", "--id", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_browse_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.args(["browse", "--help"]).assert().success();
}

#[test]
fn test_invalid_config_is_reported() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[api\n").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.args(["shows", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn test_init_writes_default_config() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    // Act
    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.args(["init", "--dir"]).arg(dir.path()).assert().success();

    // Assert
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("base_url = \"https://api.tvmaze.com/\""));
    assert!(content.contains("batch_size = 6"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.args(["init", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let mut cmd = cargo_bin_cmd!("showcat");
    cmd.args(["init", "--force", "--dir"])
        .arg(dir.path())
        .assert()
        .success();
}
