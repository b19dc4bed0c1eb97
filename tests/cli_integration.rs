// CLI integration tests for the attrjson binary.
use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{Value, json};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_attrjson");
    let mut command = Command::new(exe);
    command.env_remove("RUST_LOG");
    command
}

fn parse_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("valid json")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> std::process::Output {
    let mut child = cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("output")
}

#[test]
fn sample_output_is_wrapped_and_sorted() {
    let out = cmd().arg("--sample").output().expect("sample");
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).expect("utf8");
    assert!(text.starts_with("[\n  {\n"));
    assert!(text.contains("11,\n"));
    assert!(!text.contains("11.0"));
    assert_eq!(
        parse_json(text.as_bytes()),
        json!([{
            "map_1": {"list_1": [11, false], "null_1": null},
            "number_1": 1.5,
            "string_1": "784498",
            "string_2": 1405544146
        }])
    );
}

#[test]
fn reads_file_and_honors_output_flags() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("item.json");
    std::fs::write(&path, r#"{"b":{"N":"2"},"a":{"S":"x","ignored":"y"}}"#).expect("write");

    let out = cmd()
        .args([path.to_str().unwrap(), "--no-wrap", "--compact"])
        .output()
        .expect("run");
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "{\"a\":\"x\",\"b\":2}\n"
    );
}

#[test]
fn reads_stdin_by_default() {
    let out = run_with_stdin(&["--compact"], r#"{"flag":{"BOOL":"T"}}"#);
    assert!(out.status.success());
    assert_eq!(parse_json(&out.stdout), json!([{"flag": true}]));
}

#[test]
fn strict_tags_flag_drops_multi_key_nodes() {
    let out = run_with_stdin(
        &["-", "--strict-tags", "--no-wrap"],
        r#"{"a":{"S":"x","N":"1"},"b":{"S":"y"}}"#,
    );
    assert!(out.status.success());
    assert_eq!(parse_json(&out.stdout), json!({"b": "y"}));
}

#[test]
fn config_file_sets_options() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = temp.path().join("options.json");
    std::fs::write(&config, r#"{"max_depth":0}"#).expect("write");

    let out = run_with_stdin(
        &["--config", config.to_str().unwrap(), "--no-wrap"],
        r#"{"m":{"M":{"k":{"S":"v"}}},"s":{"S":"kept"}}"#,
    );
    assert!(out.status.success());
    assert_eq!(parse_json(&out.stdout), json!({"s": "kept"}));
}

#[test]
fn empty_result_exits_with_error_json() {
    let out = run_with_stdin(&[], r#"{"":{"S":"x"},"a":{"BOOL":"maybe"}}"#);
    assert_eq!(out.status.code(), Some(5));
    assert!(out.stdout.is_empty());
    let err = parse_json(&out.stderr);
    assert_eq!(err["error"]["kind"], "empty-data");
    assert_eq!(err["error"]["path"], "$");
}

#[test]
fn non_object_input_is_invalid_data() {
    let out = run_with_stdin(&[], r#"["not","a","map"]"#);
    assert_eq!(out.status.code(), Some(4));
    let err = parse_json(&out.stderr);
    assert_eq!(err["error"]["kind"], "invalid-data");
}

#[test]
fn malformed_json_is_usage_error() {
    let out = run_with_stdin(&[], r#"{"a": "#);
    assert_eq!(out.status.code(), Some(2));
    let err = parse_json(&out.stderr);
    assert_eq!(err["error"]["kind"], "usage");
    assert!(err["error"]["hint"].as_str().unwrap().starts_with("line 1"));
}

#[test]
fn missing_file_is_usage_error() {
    let out = cmd().arg("/nonexistent/attrjson-input.json").output().expect("run");
    assert_eq!(out.status.code(), Some(2));
    let err = parse_json(&out.stderr);
    assert_eq!(err["error"]["kind"], "usage");
}

#[test]
fn verbose_logs_dropped_entries_to_stderr_only() {
    let out = run_with_stdin(&["-v", "--compact"], r#"{"a":{"N":"abc"},"b":{"S":"ok"}}"#);
    assert!(out.status.success());
    assert_eq!(parse_json(&out.stdout), json!([{"b": "ok"}]));
    let logs = String::from_utf8_lossy(&out.stderr);
    assert!(logs.contains("dropping attribute"));
    assert!(logs.contains("$.a"));
}
