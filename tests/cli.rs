// ABOUTME: Integration tests for the pullwatch CLI commands.
// ABOUTME: Validates --help output, init, and shell behavior without a daemon.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn pullwatch_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("pullwatch"))
}

#[test]
fn help_shows_commands() {
    pullwatch_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("shell"))
        .stdout(predicate::str::contains("pull"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("pullwatch.yml");

    pullwatch_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "pullwatch.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("registry: registry.hub.docker.com"));
    assert!(content.contains("architecture: amd64"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("pullwatch.yml");

    fs::write(&config_path, "architecture: arm").unwrap();

    pullwatch_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn shell_status_shows_configured_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("pullwatch.yml"),
        "registry: mirror.local\narchitecture: arm64\n",
    )
    .unwrap();

    pullwatch_cmd()
        .current_dir(temp_dir.path())
        .env_remove("PULLWATCH_REGISTRY")
        .env_remove("PULLWATCH_ARCH")
        .arg("shell")
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("state: idle"))
        .stdout(predicate::str::contains("registry: mirror.local"))
        .stdout(predicate::str::contains("arch: arm64"));
}

#[test]
fn shell_rejects_blank_pull_and_keeps_running() {
    let temp_dir = tempfile::tempdir().unwrap();

    pullwatch_cmd()
        .current_dir(temp_dir.path())
        .write_stdin("pull\nstatus\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("image reference cannot be empty"))
        .stdout(predicate::str::contains("state: idle"));
}

#[test]
fn one_shot_pull_rejects_blank_image() {
    let temp_dir = tempfile::tempdir().unwrap();

    pullwatch_cmd()
        .current_dir(temp_dir.path())
        .args(["pull", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("image reference cannot be empty"));
}

#[test]
fn invalid_env_architecture_fails_fast() {
    let temp_dir = tempfile::tempdir().unwrap();

    pullwatch_cmd()
        .current_dir(temp_dir.path())
        .env("PULLWATCH_ARCH", "sparc")
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PULLWATCH_ARCH"));
}
