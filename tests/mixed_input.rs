//! Integration tests for mixed JSON + non-JSON input and degradation.

use assert_cmd::Command;
use predicates::prelude::*;

fn jlv() -> Command {
    let mut cmd = Command::cargo_bin("jlv").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/jlv-test-no-config");
    cmd
}

#[test]
fn json_and_plain_text_mixed() {
    let input = std::fs::read_to_string("tests/fixtures/mixed.jsonl").unwrap();
    let output = jlv()
        .arg("--color=never")
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    // Plain text lines pass through unchanged
    assert!(stdout.contains("Starting application..."));
    assert!(stdout.contains("Plain text log line"));
    assert!(stdout.contains("Shutting down."));

    // JSON lines are formatted
    assert!(stdout.contains("info server started"));
    assert!(stdout.contains("error connection failed"));

    // Malformed JSON passes through unchanged
    assert!(stdout.contains(r#"{"level":"info", "msg":}"#));

    // Nothing dropped: 6 in, 6 out
    assert_eq!(stdout.matches('\n').count(), 6);
}

#[test]
fn raw_line_rendered_exactly() {
    jlv()
        .arg("--color=never")
        .write_stdin("not json at all")
        .assert()
        .success()
        .stdout("not json at all\n");
}

#[test]
fn json_array_passthrough_as_raw() {
    let input = "[1, 2, 3]\n{\"level\":\"info\",\"msg\":\"after array\"}\n";
    let output = jlv()
        .arg("--color=never")
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[1, 2, 3]"));
    assert!(stdout.contains("info after array"));
}

#[test]
fn control_characters_stripped_from_raw_lines() {
    let output = jlv()
        .arg("--color=never")
        .write_stdin("bell\u{7} and escape\u{1b} here")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "bell and escape here\n");
}

#[test]
fn newlines_in_field_values_stay_on_one_line() {
    let input = r#"{"level":"info","msg":"line1\nline2","stack":"a\nb\nc"}"#;
    let output = jlv()
        .arg("--color=never")
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches('\n').count(), 1, "one output line expected");
    assert!(stdout.contains("line1\\nline2"));
}

#[test]
fn prefixed_json_keeps_prefix_text() {
    let input = r#"container-1 {"level":"debug","msg":"health check"}"#;
    jlv()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("debug container-1 health check"));
}

#[test]
fn no_recognized_fields_renders_key_value_pairs() {
    let input = r#"{"custom_a":"value_a","custom_b":42}"#;
    jlv()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("custom_a=value_a custom_b=42\n");
}

#[test]
fn empty_json_object_renders_empty_line() {
    jlv()
        .arg("--color=never")
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn missing_message_omitted_not_padded() {
    let input = r#"{"level":"warn","region":"eu"}"#;
    jlv()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("warn region=eu\n");
}
