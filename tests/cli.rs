// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn piperun(action: &str, config: &Path, dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("piperun").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("PIPERUN_RUNNER")
        .env("NO_COLOR", "1")
        .arg(action)
        .arg("--pipeline-config")
        .arg(config)
        .arg("--pipeline-dir")
        .arg(dir);
    cmd
}

#[test]
fn status_of_nothing_exits_zero() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("missing.yaml");
    let dir = temp.path().join("missing-dir");

    piperun("status", &config, &dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Pipeline directory does not exist"))
        .stderr(predicate::str::contains("Config file does not exist"));

    assert!(!dir.exists());
}

#[test]
fn init_then_run_succeeds() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("conf/pipeline.yaml");
    let dir = temp.path().join("work");

    piperun("init", &config, &dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Created sample config"));
    assert!(config.is_file());
    assert!(dir.is_dir());

    piperun("run", &config, &dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Executing step 1: Setup"))
        .stderr(predicate::str::contains("Processing data"))
        .stderr(predicate::str::contains("Executing step 3: Cleanup"));
}

#[test]
fn init_twice_keeps_existing_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pipeline.yaml");
    let dir = temp.path().join("work");

    piperun("init", &config, &dir).assert().success();
    let first = std::fs::read_to_string(&config).unwrap();

    piperun("init", &config, &dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(std::fs::read_to_string(&config).unwrap(), first);
}

#[test]
fn run_stops_at_first_failure() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pipeline.yaml");
    let dir = temp.path().join("work");
    std::fs::write(
        &config,
        r#"
steps:
  - name: first
    command: "touch first.txt"
  - name: broken
    command: "echo nope >&2; exit 4"
  - name: never
    command: "touch never.txt"
"#,
    )
    .unwrap();

    piperun("run", &config, &dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Step 2 failed"))
        .stderr(predicate::str::contains("nope"));

    assert!(dir.join("first.txt").exists());
    assert!(!dir.join("never.txt").exists());
}

#[test]
fn run_without_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("missing.yaml");
    let dir = temp.path().join("work");

    piperun("run", &config, &dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn run_with_malformed_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pipeline.yaml");
    std::fs::write(&config, "steps: [unclosed").unwrap();

    piperun("run", &config, &temp.path().join("work"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn run_with_empty_commands_succeeds() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pipeline.yaml");
    std::fs::write(&config, "commands: []\n").unwrap();

    piperun("run", &config, &temp.path().join("work"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Running command").not());
}

#[test]
fn run_without_items_uses_sample_commands() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pipeline.yaml");
    std::fs::write(&config, "name: bare\n").unwrap();

    piperun("run", &config, &temp.path().join("work"))
        .assert()
        .success()
        .stderr(predicate::str::contains("No steps or commands found"))
        .stderr(predicate::str::contains("Executing sample command 4: echo 'Pipeline completed'"));
}

#[test]
fn missing_runner_fails_the_step() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pipeline.yaml");
    std::fs::write(&config, "commands: [\"--version\"]\n").unwrap();

    piperun("run", &config, &temp.path().join("work"))
        .arg("--runner")
        .arg("piperun-no-such-runner")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Command 1 failed"));
}

#[test]
fn verbose_enables_debug_lines() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pipeline.yaml");
    std::fs::write(&config, "commands: [\"true\"]\n").unwrap();

    piperun("run", &config, &temp.path().join("work"))
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn required_options_are_enforced() {
    Command::cargo_bin("piperun")
        .unwrap()
        .env_remove("PIPERUN_CONFIG")
        .env_remove("PIPERUN_DIR")
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--pipeline-config"));
}
