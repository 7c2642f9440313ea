//! E2E CLI tests covering:
//! - First-contact seeding (`rwd ls` on a fresh directory)
//! - The mutation commands (`rwd add/rm/edit/check/uncheck`)
//! - Time travel (`rwd back`, `rwd forward`) and the append-resets rule
//! - Session isolation via `--session`
//! - JSON output contracts
//!
//! Each test runs `rwd` as a subprocess against an isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the rwd binary, storing under `dir`.
fn rwd_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rwd"));
    cmd.arg("--dir").arg(dir);
    cmd.env("REWIND_LOG", "error");
    cmd.env_remove("REWIND_DIR");
    cmd
}

/// Run `rwd ls --json` and parse the output.
fn ls_json(dir: &Path) -> Value {
    let output = rwd_cmd(dir)
        .args(["ls", "--json"])
        .output()
        .expect("ls should not crash");
    assert!(
        output.status.success(),
        "ls failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("ls --json should produce valid JSON")
}

/// Add a task via CLI, return its id.
fn add_task(dir: &Path, content: &str) -> String {
    let output = rwd_cmd(dir)
        .args(["add", content, "--json"])
        .output()
        .expect("add should not crash");
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value =
        serde_json::from_slice(&output.stdout).expect("add --json should produce valid JSON");
    json["id"]
        .as_str()
        .expect("add output should have 'id' field")
        .to_string()
}

fn task_contents(json: &Value) -> Vec<&str> {
    json["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|t| t["content"].as_str().expect("content"))
        .collect()
}

// ---------------------------------------------------------------------------
// Seeding and listing
// ---------------------------------------------------------------------------

#[test]
fn fresh_directory_is_seeded_with_one_task() {
    let tmp = TempDir::new().expect("tempdir");
    let json = ls_json(tmp.path());
    assert_eq!(task_contents(&json), vec!["feed the cat"]);
    assert_eq!(json["offset"], 0);
    assert_eq!(json["log_len"], 1);
}

#[test]
fn human_ls_prints_checkbox_rows() {
    let tmp = TempDir::new().expect("tempdir");
    rwd_cmd(tmp.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ]"))
        .stdout(predicate::str::contains("feed the cat"));
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[test]
fn add_then_check_then_edit() {
    let tmp = TempDir::new().expect("tempdir");
    let id = add_task(tmp.path(), "water the plants");

    rwd_cmd(tmp.path()).args(["check", &id]).assert().success();
    rwd_cmd(tmp.path())
        .args(["edit", &id, "water the plants twice"])
        .assert()
        .success();

    let json = ls_json(tmp.path());
    let task = json["tasks"]
        .as_array()
        .expect("tasks")
        .iter()
        .find(|t| t["id"] == Value::from(id.clone()))
        .expect("edited task");
    assert_eq!(task["content"], "water the plants twice");
    assert_eq!(task["checked"], true, "edit must keep the checked flag");
}

#[test]
fn rm_removes_and_uncheck_reverts() {
    let tmp = TempDir::new().expect("tempdir");
    let keep = add_task(tmp.path(), "keep me");
    let gone = add_task(tmp.path(), "remove me");

    rwd_cmd(tmp.path()).args(["check", &keep]).assert().success();
    rwd_cmd(tmp.path()).args(["uncheck", &keep]).assert().success();
    rwd_cmd(tmp.path()).args(["rm", &gone]).assert().success();

    let json = ls_json(tmp.path());
    let contents = task_contents(&json);
    assert!(contents.contains(&"keep me"));
    assert!(!contents.contains(&"remove me"));
    let kept = json["tasks"]
        .as_array()
        .expect("tasks")
        .iter()
        .find(|t| t["id"] == Value::from(keep.clone()))
        .expect("kept task");
    assert_eq!(kept["checked"], false);
}

#[test]
fn unique_id_prefix_is_accepted() {
    let tmp = TempDir::new().expect("tempdir");
    let id = add_task(tmp.path(), "prefix target");

    rwd_cmd(tmp.path())
        .args(["check", &id[..8]])
        .assert()
        .success();

    let json = ls_json(tmp.path());
    let task = json["tasks"]
        .as_array()
        .expect("tasks")
        .iter()
        .find(|t| t["id"] == Value::from(id.as_str()))
        .expect("task");
    assert_eq!(task["checked"], true);
}

#[test]
fn unresolvable_id_fails_with_an_error() {
    let tmp = TempDir::new().expect("tempdir");
    ls_json(tmp.path());

    rwd_cmd(tmp.path())
        .args(["check", "zzzzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no task matches"));
}

// ---------------------------------------------------------------------------
// Time travel
// ---------------------------------------------------------------------------

#[test]
fn back_hides_recent_actions_and_forward_restores_them() {
    let tmp = TempDir::new().expect("tempdir");
    add_task(tmp.path(), "second");
    add_task(tmp.path(), "third");

    rwd_cmd(tmp.path()).arg("back").assert().success();
    rwd_cmd(tmp.path()).arg("back").assert().success();

    let json = ls_json(tmp.path());
    assert_eq!(task_contents(&json), vec!["feed the cat"]);
    assert_eq!(json["offset"], 2);

    rwd_cmd(tmp.path()).arg("forward").assert().success();
    let json = ls_json(tmp.path());
    assert_eq!(task_contents(&json), vec!["feed the cat", "second"]);
}

#[test]
fn forward_at_the_present_is_a_no_op() {
    let tmp = TempDir::new().expect("tempdir");
    ls_json(tmp.path());

    rwd_cmd(tmp.path()).arg("forward").assert().success();
    let json = ls_json(tmp.path());
    assert_eq!(json["offset"], 0);
    assert_eq!(task_contents(&json), vec!["feed the cat"]);
}

#[test]
fn mutation_while_in_the_past_appends_and_returns_to_present() {
    let tmp = TempDir::new().expect("tempdir");
    add_task(tmp.path(), "second");

    rwd_cmd(tmp.path()).arg("back").assert().success();
    add_task(tmp.path(), "third");

    // The hidden action was not discarded: all three tasks are visible
    // and the cursor is back at the present.
    let json = ls_json(tmp.path());
    assert_eq!(json["offset"], 0);
    assert_eq!(
        task_contents(&json),
        vec!["feed the cat", "second", "third"]
    );
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[test]
fn sessions_have_independent_task_lists() {
    let tmp = TempDir::new().expect("tempdir");
    add_task(tmp.path(), "default only");

    let output = rwd_cmd(tmp.path())
        .args(["ls", "--json", "--session", "other"])
        .output()
        .expect("ls should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(task_contents(&json), vec!["feed the cat"]);
}

// ---------------------------------------------------------------------------
// Raw log
// ---------------------------------------------------------------------------

#[test]
fn log_marks_actions_hidden_by_the_cursor() {
    let tmp = TempDir::new().expect("tempdir");
    add_task(tmp.path(), "second");
    rwd_cmd(tmp.path()).arg("back").assert().success();

    rwd_cmd(tmp.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("~"))
        .stdout(predicate::str::contains("cursor is 1 step(s) in the past"));
}

#[test]
fn log_lists_every_action_in_order() {
    let tmp = TempDir::new().expect("tempdir");
    let id = add_task(tmp.path(), "second");
    rwd_cmd(tmp.path()).args(["rm", &id]).assert().success();

    let output = rwd_cmd(tmp.path())
        .args(["log", "--json"])
        .output()
        .expect("log should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let actions = json["actions"].as_array().expect("actions array");
    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0]["type"], "add");
    assert_eq!(actions[1]["type"], "add");
    assert_eq!(actions[2]["type"], "delete");
}
