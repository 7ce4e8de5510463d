//! CLI E2E tests. Each test gets its own data directory.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn cli(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("multitimer");
    cmd.env("MULTITIMER_DATA_DIR", dir.path())
        .env_remove("MULTITIMER_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

fn start(dir: &TempDir, name: &str) -> String {
    let event = stdout_json(cli(dir).args(["start", name]));
    assert_eq!(event["type"], "TimerCreated");
    event["timer"]["id"].as_str().expect("timer id").to_string()
}

#[test]
fn start_then_list_shows_running_timer() {
    let dir = tempdir().unwrap();
    let id = start(&dir, "Tapete");

    let timers = stdout_json(cli(&dir).args(["list", "--json"]));
    assert_eq!(timers[0]["id"], id.as_str());
    assert_eq!(timers[0]["name"], "Tapete");
    assert_eq!(timers[0]["isRunning"], true);

    cli(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 running / 1 total"))
        .stdout(predicate::str::contains("Tapete"));
}

#[test]
fn multi_word_names_are_joined() {
    let dir = tempdir().unwrap();
    let event = stdout_json(cli(&dir).args(["start", "Sala", "de", "estar"]));
    assert_eq!(event["timer"]["name"], "Sala de estar");
}

#[test]
fn blank_name_starts_nothing() {
    let dir = tempdir().unwrap();
    cli(&dir)
        .args(["start", "   "])
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing started"));

    let timers = stdout_json(cli(&dir).args(["list", "--json"]));
    assert_eq!(timers.as_array().unwrap().len(), 0);
}

#[test]
fn pause_resume_stop_by_prefix() {
    let dir = tempdir().unwrap();
    let id = start(&dir, "Cozinha");
    let prefix = &id[..8];

    let paused = stdout_json(cli(&dir).args(["pause", prefix]));
    assert_eq!(paused["type"], "TimerPaused");

    cli(&dir)
        .args(["pause", prefix])
        .assert()
        .success()
        .stderr(predicate::str::contains("already paused"));

    let resumed = stdout_json(cli(&dir).args(["resume", prefix]));
    assert_eq!(resumed["type"], "TimerResumed");

    let stopped = stdout_json(cli(&dir).args(["stop", &id]));
    assert_eq!(stopped["type"], "TimerStopped");
    assert_eq!(stopped["entry"]["name"], "Cozinha");

    let history = stdout_json(cli(&dir).args(["history", "--json"]));
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["id"], id.as_str());

    let timers = stdout_json(cli(&dir).args(["list", "--json"]));
    assert_eq!(timers.as_array().unwrap().len(), 0);
}

#[test]
fn unknown_id_is_a_quiet_no_op() {
    let dir = tempdir().unwrap();
    cli(&dir)
        .args(["stop", "does-not-exist"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no active timer matches"));
}

#[test]
fn history_is_capped_at_ten() {
    let dir = tempdir().unwrap();
    for i in 0..11 {
        let id = start(&dir, &format!("job {i}"));
        cli(&dir).args(["stop", &id]).assert().success();
    }
    let history = stdout_json(cli(&dir).args(["history", "--json"]));
    let names: Vec<_> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "job 10");
    assert!(!names.contains(&"job 0".to_string()));
}

#[test]
fn history_clear_requires_confirmation() {
    let dir = tempdir().unwrap();
    let id = start(&dir, "x");
    cli(&dir).args(["stop", &id]).assert().success();

    cli(&dir)
        .args(["history", "clear"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("aborted"));
    let history = stdout_json(cli(&dir).args(["history", "--json"]));
    assert_eq!(history.as_array().unwrap().len(), 1);

    cli(&dir)
        .args(["history", "clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 removed"));
    cli(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("no finished timers"));
}

#[test]
fn config_get_set_and_reject_unknown() {
    let dir = tempdir().unwrap();
    cli(&dir)
        .args(["config", "get", "refresh.interval_ms"])
        .assert()
        .success()
        .stdout("50\n");
    cli(&dir)
        .args(["config", "set", "display.utc", "true"])
        .assert()
        .success();
    cli(&dir)
        .args(["config", "get", "display.utc"])
        .assert()
        .success()
        .stdout("true\n");
    cli(&dir)
        .args(["config", "set", "display.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn zero_refresh_interval_is_rejected() {
    let dir = tempdir().unwrap();
    cli(&dir)
        .args(["config", "set", "refresh.interval_ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be at least 1"));
    cli(&dir)
        .args(["config", "get", "refresh.interval_ms"])
        .assert()
        .success()
        .stdout("50\n");
}

#[test]
fn malformed_config_falls_back_with_warning() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "refresh = [").unwrap();
    cli(&dir)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("using default configuration"));
}

#[test]
fn completions_are_generated() {
    let dir = tempdir().unwrap();
    cli(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("multitimer"));
}
