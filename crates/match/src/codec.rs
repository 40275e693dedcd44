//! Text form of a [`Delta`].
//!
//! Every record occupies one line and records are separated by `\n`:
//!
//! ```text
//! Start character: <start> [--- <removed>][+++ <inserted>]
//! ```
//!
//! `<start>` is the 1-based index into the old text and a section is omitted
//! when its payload is empty. Inside a payload `\`, `]`, newline and carriage
//! return are written as `\\`, `\]`, `\n` and `\r`; all other bytes are copied
//! verbatim, so plain text without those bytes reads exactly as typed.

use std::borrow::Cow;
use std::io::{self, Write};

use logging::trace_codec;

use crate::error::MalformedDelta;
use crate::script::{Delta, EditRecord};

const MARKER: &[u8] = b"Start character: ";
const REMOVED_OPEN: &[u8] = b"[--- ";
const INSERTED_OPEN: &[u8] = b"[+++ ";
const SECTION_CLOSE: u8 = b']';
const ESCAPE: u8 = b'\\';

/// Serializes `delta` into its text form.
///
/// An empty delta serializes to an empty buffer.
///
/// # Examples
///
/// ```
/// use matching::{compare, serialize_delta};
///
/// let delta = compare("hello", "hello world", 2);
/// assert_eq!(serialize_delta(&delta), b"Start character: 6 [+++  world]");
/// ```
#[must_use]
pub fn serialize_delta(delta: &Delta<'_>) -> Vec<u8> {
    let mut out = Vec::new();
    for (index, record) in delta.iter().enumerate() {
        if index > 0 {
            out.push(b'\n');
        }
        encode_record(record, &mut out);
    }
    out
}

/// Streams the text form of `delta` into `writer`.
///
/// The output is byte-identical to [`serialize_delta`]; no trailing newline is
/// written after the last record.
pub fn write_delta<W: Write>(delta: &Delta<'_>, mut writer: W) -> io::Result<()> {
    let mut scratch = Vec::new();
    for (index, record) in delta.iter().enumerate() {
        scratch.clear();
        if index > 0 {
            scratch.push(b'\n');
        }
        encode_record(record, &mut scratch);
        writer.write_all(&scratch)?;
    }
    Ok(())
}

fn encode_record(record: &EditRecord<'_>, out: &mut Vec<u8>) {
    out.extend_from_slice(MARKER);
    out.extend_from_slice(record.start().to_string().as_bytes());
    out.push(b' ');
    for (open, payload) in [
        (REMOVED_OPEN, record.removed()),
        (INSERTED_OPEN, record.inserted()),
    ] {
        if !payload.is_empty() {
            out.extend_from_slice(open);
            escape_into(payload, out);
            out.push(SECTION_CLOSE);
        }
    }
}

fn escape_into(payload: &[u8], out: &mut Vec<u8>) {
    for &byte in payload {
        match byte {
            ESCAPE => out.extend_from_slice(b"\\\\"),
            SECTION_CLOSE => out.extend_from_slice(b"\\]"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            other => out.push(other),
        }
    }
}

/// Parses the text form of a delta.
///
/// Blank lines are skipped and a trailing carriage return on a line is
/// ignored. Payloads without escapes borrow from `text`.
///
/// # Errors
///
/// Returns a [`MalformedDelta`] naming the first line that does not follow
/// the format.
///
/// # Examples
///
/// ```
/// use matching::{EditKind, parse_delta};
///
/// let delta = parse_delta("Start character: 1 [--- h][+++ j]\nStart character: 9 [+++ !]").unwrap();
/// assert_eq!(delta.len(), 2);
/// assert_eq!(delta.records()[0].kind(), EditKind::Substitution);
/// assert_eq!(delta.records()[1].inserted(), b"!");
/// ```
pub fn parse_delta<T>(text: &T) -> Result<Delta<'_>, MalformedDelta>
where
    T: AsRef<[u8]> + ?Sized,
{
    let mut records = Vec::new();
    for (index, raw) in text.as_ref().split(|&byte| byte == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        if raw.is_empty() {
            continue;
        }
        records.push(parse_record(raw, index + 1)?);
    }
    trace_codec!(records = records.len(), "parsed delta");
    Ok(Delta::new(records))
}

fn parse_record(raw: &[u8], line: usize) -> Result<EditRecord<'_>, MalformedDelta> {
    let rest = raw
        .strip_prefix(MARKER)
        .ok_or(MalformedDelta::MissingMarker { line })?;

    let token_len = rest
        .iter()
        .position(|&byte| byte == b' ')
        .unwrap_or(rest.len());
    let (token, rest) = rest.split_at(token_len);
    let start = std::str::from_utf8(token)
        .ok()
        .and_then(|token| token.parse::<usize>().ok())
        .filter(|&start| start > 0)
        .ok_or_else(|| MalformedDelta::InvalidIndex {
            line,
            value: String::from_utf8_lossy(token).into_owned(),
        })?;

    let mut rest = rest
        .strip_prefix(b" ")
        .ok_or(MalformedDelta::EmptyRecord { line })?;

    let mut removed: Cow<'_, [u8]> = Cow::Borrowed(&[]);
    if let Some(body) = rest.strip_prefix(REMOVED_OPEN) {
        (removed, rest) = read_section(body, line)?;
    }
    let mut inserted: Cow<'_, [u8]> = Cow::Borrowed(&[]);
    if let Some(body) = rest.strip_prefix(INSERTED_OPEN) {
        (inserted, rest) = read_section(body, line)?;
    }

    if !rest.is_empty() {
        return Err(MalformedDelta::UnexpectedContent {
            line,
            column: raw.len() - rest.len() + 1,
        });
    }
    if removed.is_empty() && inserted.is_empty() {
        return Err(MalformedDelta::EmptyRecord { line });
    }
    Ok(EditRecord::new(start, removed, inserted))
}

/// Reads an escaped payload up to its closing bracket, returning the payload
/// and the bytes after the bracket.
fn read_section(body: &[u8], line: usize) -> Result<(Cow<'_, [u8]>, &[u8]), MalformedDelta> {
    let mut unescaped: Option<Vec<u8>> = None;
    let mut index = 0;

    while let Some(&byte) = body.get(index) {
        match byte {
            SECTION_CLOSE => {
                let payload = unescaped.map_or(Cow::Borrowed(&body[..index]), Cow::Owned);
                return Ok((payload, &body[index + 1..]));
            }
            ESCAPE => {
                let decoded = match body.get(index + 1) {
                    Some(&ESCAPE) => ESCAPE,
                    Some(&SECTION_CLOSE) => SECTION_CLOSE,
                    Some(b'n') => b'\n',
                    Some(b'r') => b'\r',
                    Some(_) => return Err(MalformedDelta::InvalidEscape { line }),
                    None => return Err(MalformedDelta::UnterminatedSection { line }),
                };
                unescaped
                    .get_or_insert_with(|| body[..index].to_vec())
                    .push(decoded);
                index += 2;
            }
            other => {
                if let Some(buffer) = unescaped.as_mut() {
                    buffer.push(other);
                }
                index += 1;
            }
        }
    }

    Err(MalformedDelta::UnterminatedSection { line })
}

/// Reconstructs the updated text from `old` and the text form of a delta.
///
/// # Errors
///
/// Returns a [`MalformedDelta`] when the text cannot be parsed or its records
/// do not fit `old`.
pub fn try_apply_delta(
    old: impl AsRef<[u8]>,
    delta_text: impl AsRef<[u8]>,
) -> Result<Vec<u8>, MalformedDelta> {
    let delta = parse_delta(delta_text.as_ref())?;
    let rebuilt = delta.apply(old.as_ref())?;
    trace_codec!(
        records = delta.len(),
        old_len = old.as_ref().len(),
        rebuilt_len = rebuilt.len(),
        "applied delta"
    );
    Ok(rebuilt)
}

/// Reconstructs the updated text from `old` and the text form of a delta,
/// returning `old` unchanged when the delta is malformed.
///
/// The rejection is logged as a warning under the `rdelta::codec` target.
///
/// # Examples
///
/// ```
/// use matching::apply_delta;
///
/// assert_eq!(apply_delta("world", "Start character: 1 [+++ hello ]"), b"hello world");
/// assert_eq!(apply_delta("world", "garbage"), b"world");
/// ```
#[must_use]
pub fn apply_delta(old: impl AsRef<[u8]>, delta_text: impl AsRef<[u8]>) -> Vec<u8> {
    let old = old.as_ref();
    match try_apply_delta(old, delta_text) {
        Ok(rebuilt) => rebuilt,
        Err(error) => {
            tracing::warn!(target: "rdelta::codec", %error, "delta rejected, keeping old text");
            old.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare;

    #[test]
    fn records_are_joined_without_trailing_newline() {
        let delta = compare("hello world", "jello worlx", 2);
        assert_eq!(
            serialize_delta(&delta),
            b"Start character: 1 [--- h][+++ j]\nStart character: 11 [--- d][+++ x]"
        );
    }

    #[test]
    fn empty_delta_serializes_to_nothing() {
        assert!(serialize_delta(&compare("same", "same", 3)).is_empty());
    }

    #[test]
    fn write_delta_matches_serialize() {
        let delta = compare("one two three", "one 2 three!", 2);
        let mut streamed = Vec::new();
        write_delta(&delta, &mut streamed).expect("write");
        assert_eq!(streamed, serialize_delta(&delta));
    }

    #[test]
    fn special_bytes_are_escaped() {
        let delta = compare("a", "a]\\\n\r", 1);
        let text = serialize_delta(&delta);
        assert_eq!(text, b"Start character: 2 [+++ \\]\\\\\\n\\r]");

        let parsed = parse_delta(&text).expect("parse");
        assert_eq!(parsed.records()[0].inserted(), b"]\\\n\r");
    }

    #[test]
    fn unescaped_payload_is_borrowed() {
        let text = b"Start character: 4 [--- abc]";
        let delta = parse_delta(text).expect("parse");
        let removed = delta.records()[0].removed();
        assert_eq!(removed, b"abc");
        assert!(std::ptr::eq(removed.as_ptr(), text[24..].as_ptr()));
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let delta = parse_delta("\r\nStart character: 2 [--- b]\r\n\n").expect("parse");
        assert_eq!(delta.len(), 1);
        assert_eq!(delta.records()[0].start(), 2);
    }

    #[test]
    fn malformed_lines_are_reported() {
        let cases: [(&str, MalformedDelta); 8] = [
            ("Begin: 1 [+++ x]", MalformedDelta::MissingMarker { line: 1 }),
            (
                "Start character: x1 [+++ x]",
                MalformedDelta::InvalidIndex {
                    line: 1,
                    value: "x1".to_owned(),
                },
            ),
            (
                "Start character: 0 [+++ x]",
                MalformedDelta::InvalidIndex {
                    line: 1,
                    value: "0".to_owned(),
                },
            ),
            ("Start character: 1 [+++ x", MalformedDelta::UnterminatedSection { line: 1 }),
            ("Start character: 1 [+++ \\t]", MalformedDelta::InvalidEscape { line: 1 }),
            (
                "Start character: 1 [+++ x] tail",
                MalformedDelta::UnexpectedContent { line: 1, column: 27 },
            ),
            ("Start character: 1", MalformedDelta::EmptyRecord { line: 1 }),
            ("\nStart character: 1 [--- ]", MalformedDelta::EmptyRecord { line: 2 }),
        ];

        for (text, expected) in cases {
            assert_eq!(parse_delta(text), Err(expected), "{text:?}");
        }
    }

    #[test]
    fn sections_in_reverse_order_are_rejected() {
        let error = parse_delta("Start character: 1 [+++ j][--- h]").expect_err("reversed");
        assert!(matches!(error, MalformedDelta::UnexpectedContent { .. }));
    }

    #[test]
    fn failed_application_keeps_old_text() {
        assert_eq!(apply_delta("abc", "Start character: 9 [--- z]"), b"abc");
        assert_eq!(apply_delta("abc", "Start character: 1 [--- z]"), b"abc");
        assert!(try_apply_delta("abc", "Start character: 1 [--- z]").is_err());
    }

    #[test]
    fn empty_delta_text_returns_old() {
        assert_eq!(try_apply_delta("abc", "").expect("apply"), b"abc");
    }
}
