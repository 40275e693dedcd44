//! Acquisition of the two texts and the window size.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::args::ParsedArgs;
use crate::error::CliError;

pub(crate) const OLD_PROMPT: &str = "Enter the old text:";
pub(crate) const UPDATED_PROMPT: &str = "Enter the updated text:";
pub(crate) const WINDOW_PROMPT: &str = "Enter the window size for comparison:";
pub(crate) const PROMPT_SEPARATOR: &str = "_______________________________________";

/// Everything needed to run one comparison.
#[derive(Debug)]
pub(crate) struct Comparison {
    pub(crate) old: Vec<u8>,
    pub(crate) updated: Vec<u8>,
    pub(crate) window: usize,
    /// The texts were typed at the prompts rather than passed as operands.
    pub(crate) interactive: bool,
}

/// Collects the comparison inputs from operands, files or the prompts.
pub(crate) fn acquire<In, Out>(
    parsed: &ParsedArgs,
    stdin: &mut In,
    stdout: &mut Out,
) -> Result<Comparison, CliError>
where
    In: BufRead,
    Out: Write,
{
    match (&parsed.old, &parsed.updated) {
        (Some(old), Some(updated)) => Ok(Comparison {
            old: operand_bytes(old, parsed.files, "OLD")?,
            updated: operand_bytes(updated, parsed.files, "UPDATED")?,
            window: normalize_window(parsed.window.unwrap_or(1)),
            interactive: false,
        }),
        (Some(_), None) => Err(CliError::MissingOperand("UPDATED")),
        (None, _) if parsed.files => Err(CliError::MissingOperand("OLD")),
        (None, _) => prompt(stdin, stdout, parsed.window),
    }
}

/// Reads an operand either verbatim or, with `--files`, from the named path.
pub(crate) fn operand_bytes(
    value: &OsStr,
    from_file: bool,
    label: &str,
) -> Result<Vec<u8>, CliError> {
    if from_file {
        read_file(Path::new(value), label)
    } else {
        Ok(os_bytes(value.to_os_string()))
    }
}

pub(crate) fn read_file(path: &Path, label: &str) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Read {
        what: format!("{label} file '{}'", path.display()),
        source,
    })
}

#[cfg(unix)]
fn os_bytes(value: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;
    value.into_vec()
}

#[cfg(not(unix))]
fn os_bytes(value: OsString) -> Vec<u8> {
    value.to_string_lossy().into_owned().into_bytes()
}

/// Maps a requested window size onto a usable one; anything below one selects
/// single-byte windows.
pub(crate) fn normalize_window(requested: i64) -> usize {
    if requested <= 0 {
        1
    } else {
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}

fn prompt<In, Out>(
    stdin: &mut In,
    stdout: &mut Out,
    window: Option<i64>,
) -> Result<Comparison, CliError>
where
    In: BufRead,
    Out: Write,
{
    writeln!(stdout, "{OLD_PROMPT}")?;
    stdout.flush()?;
    let old = read_line(stdin)?;

    writeln!(stdout, "{UPDATED_PROMPT}")?;
    stdout.flush()?;
    let updated = read_line(stdin)?;

    let requested = match window {
        Some(window) => window,
        None => {
            writeln!(stdout, "{WINDOW_PROMPT}")?;
            stdout.flush()?;
            parse_window_line(&read_line(stdin)?)
        }
    };
    writeln!(stdout, "{PROMPT_SEPARATOR}")?;

    Ok(Comparison {
        old,
        updated,
        window: normalize_window(requested),
        interactive: true,
    })
}

/// Reads one line and strips surrounding whitespace. End of input yields an
/// empty line.
fn read_line<In: BufRead>(stdin: &mut In) -> Result<Vec<u8>, CliError> {
    let mut line = Vec::new();
    stdin.read_until(b'\n', &mut line)?;
    Ok(line.trim_ascii().to_vec())
}

fn parse_window_line(line: &[u8]) -> i64 {
    let parsed = std::str::from_utf8(line)
        .ok()
        .and_then(|text| text.parse::<i64>().ok());
    if parsed.is_none() && !line.is_empty() {
        tracing::warn!(
            target: "rdelta::cli",
            input = %String::from_utf8_lossy(line),
            "window size is not a number, using single-byte windows"
        );
    }
    parsed.unwrap_or(0)
}
