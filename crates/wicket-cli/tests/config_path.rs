use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("wicket")
        .env("WICKET_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("wicket")
        .env("WICKET_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config to"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("theme ="));
    assert!(contents.contains("[mock]"));
}

#[test]
fn test_config_init_refuses_existing_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "theme = \"dark\"\n").unwrap();

    cargo_bin_cmd!("wicket")
        .env("WICKET_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // the user's file is left untouched
    let contents = fs::read_to_string(&config_path).unwrap();
    assert_eq!(contents, "theme = \"dark\"\n");
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("wicket")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_rejects_unknown_theme() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("wicket")
        .env("WICKET_HOME", dir.path())
        .args(["--theme", "solarized", "config", "path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
}
