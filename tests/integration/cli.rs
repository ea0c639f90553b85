//! The `collkit` binary, driven over stdin.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn collkit(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_collkit"))
        .args(args)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn collkit");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for collkit")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn run_chunks_numbers() {
    let out = collkit(&["run", "-s", "chunk=2"], "[1,2,3,4,5]");
    assert!(out.status.success());
    assert_eq!(stdout_json(&out), serde_json::json!([[1, 2], [3, 4], [5]]));
}

#[test]
fn run_flattens_ragged_arrays() {
    let out = collkit(&["run", "-s", "flatten"], r#"[[1, 2], [], ["a"]]"#);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out), serde_json::json!([1, 2, "a"]));
}

#[test]
fn run_chains_steps_in_order() {
    let out = collkit(
        &["run", "-s", "compact", "-s", "uniq", "-s", "sort=desc"],
        r#"[3, 0, 1, 3, 2, 0]"#,
    );
    assert!(out.status.success());
    assert_eq!(stdout_json(&out), serde_json::json!([3, 2, 1]));
}

#[test]
fn run_orders_objects_by_field() {
    let input = r#"[{"name":"ana","age":20},{"name":"bo","age":17},{"name":"cy","age":24}]"#;
    let out = collkit(&["run", "--step", "order-by=age"], input);
    assert!(out.status.success());
    let names: Vec<String> = stdout_json(&out)
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["bo", "ana", "cy"]);
}

#[test]
fn run_groups_objects_by_field() {
    let input = r#"[{"team":"red","n":1},{"team":"blue","n":2},{"team":"red","n":3}]"#;
    let out = collkit(&["run", "-s", "group-by=team"], input);
    assert!(out.status.success());
    let json = stdout_json(&out);
    assert_eq!(json["red"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["blue"].as_array().map(Vec::len), Some(1));
}

#[test]
fn failing_step_reports_its_number() {
    let out = collkit(&["run", "-s", "take=1", "-s", "chunk=0", "-s", "flatten"], "[1,2]");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("step 2 (chunk) failed"), "stderr: {}", stderr);
}

#[test]
fn verbose_mode_lists_steps() {
    let out = collkit(&["run", "-v", "-s", "reverse", "-s", "take=1"], "[1,2,3]");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("reverse"));
    assert!(stderr.contains("take=1"));
    assert_eq!(stdout_json(&out), serde_json::json!([3]));
}

#[test]
fn inspect_reports_shape_as_json() {
    let out = collkit(&["inspect", "--json"], "[1,2,3]");
    assert!(out.status.success());
    let shape = stdout_json(&out);
    assert_eq!(shape["kind"], "sequence");
    assert_eq!(shape["elem"], "int");
    assert_eq!(shape["len"], 3);
}

#[test]
fn inspect_refuses_null() {
    let out = collkit(&["inspect"], "null");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("nil"));
}

#[test]
fn unknown_step_is_a_usage_error() {
    let out = collkit(&["run", "-s", "shuffle"], "[]");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown step"));
}
