#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front end of `rdelta`. It compares an old
//! and an updated text with [`matching::DeltaBuilder`] and prints both texts
//! followed by the delta in the `Start character:` format. The texts come from
//! the two operands, from the files they name (`--files`), or from prompts on
//! standard input when no operand is given.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard input, output and error, so tests drive it with in-memory buffers.
//! A [`clap`](https://docs.rs/clap/) command definition parses the arguments;
//! everything after parsing reports failures through [`CliError`].
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - The delta is only ever written to standard output and diagnostics only to
//!   standard error.
//! - With `--reconstruct`, and always after prompting, the delta is serialized,
//!   parsed and applied back to the old text, and the result is compared with
//!   the updated text.
//!
//! # Errors
//!
//! Usage errors, unreadable inputs and malformed delta files exit with `1`.
//! A reconstruction that does not reproduce the updated text, which can only
//! happen with `--trust-hashes`, exits with `2`.
//!
//! # Examples
//!
//! ```
//! let mut stdin: &[u8] = b"";
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(
//!     ["rdelta", "-w", "2", "hello world", "jello world"],
//!     &mut stdin,
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().contains("Start character: 1 [--- h][+++ j]"));
//! assert!(stderr.is_empty());
//! ```

mod args;
mod error;
mod input;
mod render;

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::Path;

use clap::error::ErrorKind;
use logging::VerbosityConfig;
use matching::{DeltaBuilder, MatchPolicy, serialize_delta, try_apply_delta};

use crate::args::{PROGRAM_NAME, ParsedArgs, parse_args};
pub use crate::error::{CliError, EXIT_FAILURE, EXIT_MISMATCH};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the CLI using the provided argument iterator and I/O handles.
///
/// Returns the process exit code: `0` on success, [`EXIT_FAILURE`] for usage
/// and I/O errors and [`EXIT_MISMATCH`] when the reconstruction check fails.
pub fn run<I, S, In, Out, Err>(
    arguments: I,
    stdin: &mut In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    In: BufRead,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return report_parse_error(&error, stdout, stderr),
    };

    logging::init_tracing_with_filter(VerbosityConfig::from_verbose_level(parsed.verbosity));

    match execute(&parsed, stdin, stdout) {
        Ok(()) => 0,
        Err(error) => {
            tracing::debug!(target: "rdelta::cli", ?error, "command failed");
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            error.exit_code()
        }
    }
}

/// Converts a status returned by [`run`] into a process exit code.
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

/// Help and version requests print to stdout and succeed; everything else is
/// a usage error.
fn report_parse_error<Out, Err>(error: &clap::Error, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(stdout, "{error}").is_err() {
                return EXIT_FAILURE;
            }
            0
        }
        _ => {
            let _ = write!(stderr, "{error}");
            EXIT_FAILURE
        }
    }
}

fn execute<In, Out>(parsed: &ParsedArgs, stdin: &mut In, stdout: &mut Out) -> Result<(), CliError>
where
    In: BufRead,
    Out: Write,
{
    if let Some(delta_path) = &parsed.apply {
        return apply_delta_file(parsed, delta_path, stdout);
    }

    let comparison = input::acquire(parsed, stdin, stdout)?;
    let policy = if parsed.trust_hashes {
        MatchPolicy::HashOnly
    } else {
        MatchPolicy::Verified
    };
    let delta = DeltaBuilder::new()
        .with_window_size(comparison.window)
        .with_policy(policy)
        .build(&comparison.old, &comparison.updated);
    tracing::info!(
        target: "rdelta::cli",
        records = delta.len(),
        removed = delta.removed_bytes(),
        inserted = delta.inserted_bytes(),
        window = comparison.window,
        "comparison finished"
    );

    render::comparison_report(stdout, &comparison, &delta)?;

    if parsed.reconstruct || comparison.interactive {
        let rebuilt = try_apply_delta(&comparison.old, serialize_delta(&delta))?;
        render::bytes_line(stdout, &rebuilt)?;
        if rebuilt != comparison.updated {
            stdout.flush()?;
            return Err(CliError::ReconstructionMismatch);
        }
    }

    stdout.flush()?;
    Ok(())
}

fn apply_delta_file<Out: Write>(
    parsed: &ParsedArgs,
    delta_path: &Path,
    stdout: &mut Out,
) -> Result<(), CliError> {
    let old = parsed.old.as_deref().ok_or(CliError::MissingOperand("OLD"))?;
    let old = input::operand_bytes(old, parsed.files, "OLD")?;
    let delta_text = input::read_file(delta_path, "delta")?;

    let rebuilt = try_apply_delta(&old, &delta_text)?;
    render::bytes_line(stdout, &rebuilt)?;
    stdout.flush()?;
    Ok(())
}
