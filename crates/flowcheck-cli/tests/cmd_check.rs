//! Integration tests for `flowcheck check`.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Path to the compiled `flowcheck` binary.
fn flowcheck_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe is something like …/deps/cmd_check-<hash>
    // The binary lives in the parent directory.
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("flowcheck");
    path
}

/// Path to a shared fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // CARGO_MANIFEST_DIR is .../crates/flowcheck-cli; fixtures are in
    // tests/fixtures relative to the workspace root.
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

fn check(name: &str, extra_args: &[&str]) -> std::process::Output {
    let mut args = vec!["check".to_owned()];
    args.push(fixture(name).to_str().expect("path").to_owned());
    args.extend(extra_args.iter().map(|s| (*s).to_owned()));
    Command::new(flowcheck_bin())
        .args(&args)
        .env_remove("NO_COLOR")
        .output()
        .expect("run flowcheck check")
}

// ---------------------------------------------------------------------------
// check: acyclic fixtures (exit 0)
// ---------------------------------------------------------------------------

#[test]
fn check_linear_exits_0() {
    let out = check("linear.json", &[]);
    assert_eq!(
        out.status.code(),
        Some(0),
        "expected exit 0 for linear.json; stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn check_linear_human_output_names_the_verdict() {
    let out = check("linear.json", &[]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("pipeline is a DAG"), "stdout: {stdout}");
    assert!(stdout.contains("3 nodes, 2 edges"), "stdout: {stdout}");
}

#[test]
fn check_empty_exits_0() {
    let out = check("empty.json", &[]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn check_dangling_exits_0_and_counts_the_invalid_edge() {
    let out = check("dangling.json", &["--format", "json"]);
    assert_eq!(out.status.code(), Some(0));

    let report: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is one JSON object");
    assert_eq!(report["is_acyclic"], true);
    assert_eq!(report["valid_edge_count"], 0);
    assert_eq!(report["invalid_edge_count"], 1);
    assert_eq!(report["invalid_edges"][0], "input-1 -> deleted-node");
}

// ---------------------------------------------------------------------------
// check: cyclic fixtures (exit 1, report still printed)
// ---------------------------------------------------------------------------

#[test]
fn check_cycle_exits_1() {
    let out = check("cycle.json", &[]);
    assert_eq!(
        out.status.code(),
        Some(1),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn check_cycle_json_report_carries_evidence() {
    let out = check("cycle.json", &["--format", "json"]);
    assert_eq!(out.status.code(), Some(1));

    let report: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is one JSON object");
    assert_eq!(report["is_acyclic"], false);
    assert_eq!(report["kahn_verdict"], false);
    assert_eq!(report["dfs_verdict"], false);
    assert_eq!(report["mismatch_detected"], false);

    let evidence = report["cycle_evidence"]
        .as_array()
        .expect("evidence is an array");
    assert_eq!(evidence.len(), 2);
    assert!(
        evidence[1]
            .as_str()
            .expect("string")
            .starts_with("DFS detected cycle path:")
    );
}

#[test]
fn check_self_loop_reports_the_exact_evidence_line() {
    let out = check("self_loop.json", &["--format", "json"]);
    assert_eq!(out.status.code(), Some(1));

    let report: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is one JSON object");
    assert_eq!(
        report["cycle_evidence"][0],
        "Self-loop detected: filter-1 -> filter-1"
    );
}

// ---------------------------------------------------------------------------
// check: malformed input (exit 2)
// ---------------------------------------------------------------------------

#[test]
fn check_missing_edges_array_exits_2() {
    let out = check("missing_edges.json", &[]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("not a valid pipeline document"),
        "stderr: {stderr}"
    );
}

#[test]
fn check_nonexistent_file_exits_2() {
    let out = Command::new(flowcheck_bin())
        .args(["check", "/no/such/pipeline.json"])
        .output()
        .expect("run flowcheck check");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("file not found"), "stderr: {stderr}");
}

#[test]
fn check_rejects_oversized_input() {
    let out = Command::new(flowcheck_bin())
        .args([
            "check",
            fixture("linear.json").to_str().expect("path"),
            "--max-file-size",
            "16",
        ])
        .output()
        .expect("run flowcheck check");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("file too large"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// check: stdin
// ---------------------------------------------------------------------------

#[test]
fn check_reads_from_stdin_dash() {
    let mut child = Command::new(flowcheck_bin())
        .args(["check", "-", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn flowcheck");

    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(br#"{"nodes": [{"id": "solo"}], "edges": []}"#)
        .expect("write stdin");

    let out = child.wait_with_output().expect("wait for flowcheck");
    assert_eq!(out.status.code(), Some(0));

    let report: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is one JSON object");
    assert_eq!(report["node_count"], 1);
    assert_eq!(report["is_acyclic"], true);
}

fn check_stdin_with_limit(input: &[u8], limit: &str) -> std::process::Output {
    let mut child = Command::new(flowcheck_bin())
        .args(["check", "-", "--max-file-size", limit])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn flowcheck");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(input)
        .expect("write stdin");
    child.wait_with_output().expect("wait for flowcheck")
}

#[test]
fn check_stdin_over_the_size_cap_exits_2() {
    let doc = br#"{"nodes": [{"id": "solo"}], "edges": []}"#;
    let out = check_stdin_with_limit(doc, "16");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("file too large"), "stderr: {stderr}");
}

#[test]
fn check_stdin_exactly_at_the_size_cap_is_accepted() {
    // 26 bytes of input with a 26-byte cap: the one-byte overflow probe must
    // see EOF rather than reject the stream.
    let doc = br#"{"nodes": [], "edges": []}"#;
    assert_eq!(doc.len(), 26);
    let out = check_stdin_with_limit(doc, "26");
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}
