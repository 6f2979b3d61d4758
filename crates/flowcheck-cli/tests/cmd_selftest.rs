//! Integration tests for `flowcheck selftest` and `flowcheck version`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `flowcheck` binary.
fn flowcheck_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("flowcheck");
    path
}

#[test]
fn selftest_exits_0() {
    let out = Command::new(flowcheck_bin())
        .arg("selftest")
        .output()
        .expect("run flowcheck selftest");
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn selftest_human_output_reports_a_pass() {
    let out = Command::new(flowcheck_bin())
        .args(["selftest", "--no-color"])
        .output()
        .expect("run flowcheck selftest");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("A -> B -> C -> A"), "stdout: {stdout}");
    assert!(stdout.contains("self-test passed"), "stdout: {stdout}");
}

#[test]
fn selftest_json_output_carries_the_report() {
    let out = Command::new(flowcheck_bin())
        .args(["selftest", "--format", "json"])
        .output()
        .expect("run flowcheck selftest");
    assert_eq!(out.status.code(), Some(0));

    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is one JSON object");
    assert_eq!(value["test_passed"], true);
    assert_eq!(value["report"]["is_acyclic"], false);
    assert_eq!(value["report"]["node_count"], 3);
}

#[test]
fn version_prints_a_semver() {
    let out = Command::new(flowcheck_bin())
        .arg("version")
        .output()
        .expect("run flowcheck version");
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim().split('.').count(), 3, "stdout: {stdout}");
}
