use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const TRANSCRIPT: &str = concat!(
    r#"{"id":"rec-3","created_at":"2026-02-23T00:00:02.000Z","sequence":3,"content":"{\"type\":\"result\",\"subtype\":\"success\",\"duration_ms\":4500,\"total_cost_usd\":0.0123,\"num_turns\":3,\"result\":\"Done.\"}"}"#,
    "\n",
    r#"{"id":"rec-1","created_at":"2026-02-23T00:00:00.000Z","sequence":1,"content":"{\"type\":\"system\",\"subtype\":\"init\",\"model\":\"m1\",\"tools\":[\"a\",\"b\"]}"}"#,
    "\n",
    r#"{"id":"rec-2","created_at":"2026-02-23T00:00:01.000Z","sequence":2,"content":"{\"type\":\"assistant\",\"message\":{\"content\":[{\"type\":\"tool_use\",\"name\":\"mcp__search__query\",\"input\":{\"q\":\"rust\"}}]}}"}"#,
    "\n",
    r#"{"id":"rec-2b","created_at":"2026-02-23T00:00:01.000Z","sequence":4,"content":"\"{\\\"type\\\":\\\"error\\\",\\\"error\\\":\\\"boom\\\"}\""}"#,
    "\n",
);

fn setup_transcript(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("transcript.jsonl");
    fs::write(&path, contents).expect("write");
    (temp, path)
}

#[test]
fn default_outputs_markdown() {
    let (_temp, path) = setup_transcript(TRANSCRIPT);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentlog"));
    cmd.arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Transcript\n\n"))
        .stdout(predicate::str::contains("- Records: `4`"))
        .stdout(predicate::str::contains("- Errors: `1`"))
        .stdout(predicate::str::contains("## 1. system/init (info)"))
        .stdout(predicate::str::contains("Session started (m1, 2 tools)"))
        .stdout(predicate::str::contains("## 2. assistant (accent)"))
        .stdout(predicate::str::contains("- [tool] **search:query** (q=rust)"))
        .stdout(predicate::str::contains("## 3. error (danger)"))
        .stdout(predicate::str::contains("- [alert] boom"))
        .stdout(predicate::str::contains("## 4. result (success)"))
        .stdout(predicate::str::contains("Done (success, 3 turns, 4.5s, $0.0123)"));
}

#[test]
fn raw_outputs_json() {
    let (_temp, path) = setup_transcript(TRANSCRIPT);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentlog"));
    let output = cmd.arg(&path).arg("--raw").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).expect("utf8");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");

    let ids = value
        .as_array()
        .expect("array")
        .iter()
        .map(|record| record["id"].as_str().expect("id").to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["rec-1", "rec-2", "rec-2b", "rec-3"]);
    assert_eq!(value[1]["log"]["blocks"][0]["label"], "search:query");
    assert_eq!(value[2]["log"]["category"], "error");
    assert_eq!(value[2]["log"]["blocks"][0]["is_error"], true);
    assert_eq!(value[3]["log"]["blocks"][1]["preview"], "Done.");
}

#[test]
fn expand_outputs_full_block_content() {
    let (_temp, path) = setup_transcript(TRANSCRIPT);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentlog"));
    cmd.arg(&path)
        .arg("--expand")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- [tool] **search:query**\n\n```\n{\n  \"q\": \"rust\"\n}\n```",
        ));
}

#[test]
fn stdin_is_read_with_dash() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentlog"));
    cmd.arg("-")
        .write_stdin(
            r#"{"id":"only","created_at":"2026-02-23T00:00:00Z","sequence":1,"content":"not json at all"}"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("## 1. log (muted)"))
        .stdout(predicate::str::contains("- [message] not json at all"));
}

#[test]
fn malformed_content_still_renders() {
    let (_temp, path) = setup_transcript(
        r#"{"id":"odd","created_at":"2026-02-23T00:00:00Z","sequence":1,"content":"{\"type\":\"assistant\",\"message\":"}"#,
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentlog"));
    cmd.arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("## 1. log (muted)"))
        .stdout(predicate::str::contains("- [braces]"));
}

#[test]
fn empty_file_returns_error() {
    let (_temp, path) = setup_transcript("");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentlog"));
    cmd.arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: transcript file is empty"));
}

#[test]
fn invalid_record_line_returns_error() {
    let (_temp, path) = setup_transcript("{\"id\":\"a\"}\n");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentlog"));
    cmd.arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid record line"))
        .stderr(predicate::str::contains("at line 1"));
}

#[test]
fn missing_file_returns_error() {
    let temp = tempdir().expect("tempdir");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentlog"));
    cmd.arg(temp.path().join("missing.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: i/o error"));
}
