//! Integration tests for the `Start character:` delta text format.

use matching::{
    MalformedDelta, apply_delta, compare, parse_delta, serialize_delta, try_apply_delta,
    write_delta,
};

/// Hand-written deltas apply against the original offsets.
#[test]
fn hand_written_delta_applies() {
    let text = "Start character: 1 [--- h][+++ j]\nStart character: 7 [--- world][+++ there]";
    assert_eq!(apply_delta("hello world", text), b"jello there");
}

#[test]
fn windows_line_endings_are_accepted() {
    let text = "Start character: 1 [--- h][+++ j]\r\nStart character: 12 [+++ !]\r\n";
    assert_eq!(
        try_apply_delta("hello world", text).expect("apply"),
        b"jello world!"
    );
}

#[test]
fn display_matches_serialized_form() {
    let delta = compare("hello world", "jello world", 2);
    assert_eq!(delta.to_string(), "Start character: 1 [--- h][+++ j]");
    assert_eq!(delta.to_string().as_bytes(), serialize_delta(&delta));
}

#[test]
fn streamed_output_matches_serialized_form() {
    let delta = compare("alpha\nbeta\ngamma", "alpha\nBETA\ngamma\n", 2);
    let mut streamed = Vec::new();
    write_delta(&delta, &mut streamed).expect("write");
    assert_eq!(streamed, serialize_delta(&delta));
    assert!(!streamed.ends_with(b"\n"));
}

#[test]
fn newlines_inside_payloads_stay_on_one_line() {
    let delta = compare("a\nb", "a\r\nb\n", 1);
    let text = serialize_delta(&delta);
    let lines = text.split(|&byte| byte == b'\n').count();
    assert_eq!(lines, delta.len());
    assert_eq!(apply_delta("a\nb", &text), b"a\r\nb\n");
}

/// Malformed text leaves the old text untouched.
#[test]
fn malformed_delta_degrades_to_old_text() {
    let cases = [
        "not a delta",
        "Start character: abc [+++ x]",
        "Start character: 2 [--- x]",
        "Start character: 1 [+++ unterminated",
        "Start character: 2 [--- b]\nStart character: 1 [--- a]",
    ];
    for text in cases {
        assert_eq!(apply_delta("abc", text), b"abc", "{text:?}");
    }
}

#[test]
fn errors_name_the_offending_line() {
    let text = "Start character: 1 [--- a]\n\nStart character: 2 [+++ x] trailing";
    assert_eq!(
        parse_delta(text).expect_err("trailing content"),
        MalformedDelta::UnexpectedContent {
            line: 3,
            column: 27
        }
    );

    let text = "Start character: 2 [--- b]\nStart character: 1 [--- a]";
    assert_eq!(
        try_apply_delta("abc", text).expect_err("out of order"),
        MalformedDelta::OutOfOrder { record: 2, start: 1 }
    );
}

#[test]
fn error_messages_are_readable() {
    let error = parse_delta("Start character: 0 [+++ x]").expect_err("zero index");
    assert_eq!(error.to_string(), "line 1: invalid start index `0`");
}
