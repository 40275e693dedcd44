use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser, value_parser};

/// Program name used when the argument list is empty.
pub(crate) const PROGRAM_NAME: &str = "rdelta";

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs {
    pub(crate) old: Option<OsString>,
    pub(crate) updated: Option<OsString>,
    pub(crate) window: Option<i64>,
    pub(crate) files: bool,
    pub(crate) trust_hashes: bool,
    pub(crate) reconstruct: bool,
    pub(crate) apply: Option<PathBuf>,
    pub(crate) verbosity: u8,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compare two texts with a rolling hash and print the edits between them.")
        .after_help(
            "Without operands the texts and the window size are read from standard input.",
        )
        .arg(
            Arg::new("old")
                .value_name("OLD")
                .value_parser(OsStringValueParser::new())
                .help("Old text, or its path with --files."),
        )
        .arg(
            Arg::new("updated")
                .value_name("UPDATED")
                .value_parser(OsStringValueParser::new())
                .help("Updated text, or its path with --files."),
        )
        .arg(
            Arg::new("window")
                .long("window")
                .short('w')
                .value_name("N")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Rolling window size; values below one select single bytes."),
        )
        .arg(
            Arg::new("files")
                .long("files")
                .help("Treat OLD and UPDATED as paths to read.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trust-hashes")
                .long("trust-hashes")
                .help("Accept equal window hashes without comparing bytes.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("reconstruct")
                .long("reconstruct")
                .help("Also print the text rebuilt from OLD and the delta.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("apply")
                .long("apply")
                .value_name("DELTA_FILE")
                .value_parser(value_parser!(PathBuf))
                .conflicts_with_all(["updated", "reconstruct", "trust-hashes", "window"])
                .help("Apply the delta in DELTA_FILE to OLD and print the result."),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging verbosity (repeatable).")
                .action(ArgAction::Count),
        )
}

pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    Ok(ParsedArgs {
        old: matches.remove_one::<OsString>("old"),
        updated: matches.remove_one::<OsString>("updated"),
        window: matches.remove_one::<i64>("window"),
        files: matches.get_flag("files"),
        trust_hashes: matches.get_flag("trust-hashes"),
        reconstruct: matches.get_flag("reconstruct"),
        apply: matches.remove_one::<PathBuf>("apply"),
        verbosity: matches.get_count("verbose"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clap_command_is_consistent() {
        clap_command().debug_assert();
    }

    #[test]
    fn parse_args_reads_operands_and_flags() {
        let parsed = parse_args(["rdelta", "-vv", "-w", "4", "--reconstruct", "old", "new"])
            .expect("parse");

        assert_eq!(parsed.old.as_deref(), Some("old".as_ref()));
        assert_eq!(parsed.updated.as_deref(), Some("new".as_ref()));
        assert_eq!(parsed.window, Some(4));
        assert_eq!(parsed.verbosity, 2);
        assert!(parsed.reconstruct);
        assert!(!parsed.trust_hashes);
        assert!(!parsed.files);
    }

    #[test]
    fn parse_args_accepts_negative_window() {
        let parsed = parse_args(["rdelta", "--window", "-3", "a", "b"]).expect("parse");
        assert_eq!(parsed.window, Some(-3));
    }

    #[test]
    fn parse_args_without_operands_selects_prompts() {
        let parsed = parse_args(Vec::<OsString>::new()).expect("parse");
        assert!(parsed.old.is_none());
        assert!(parsed.updated.is_none());
    }

    #[test]
    fn apply_conflicts_with_updated_operand() {
        let error = parse_args(["rdelta", "--apply", "d.txt", "old", "new"]).expect_err("conflict");
        assert_eq!(error.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn non_numeric_window_is_rejected() {
        let error = parse_args(["rdelta", "-w", "wide", "a", "b"]).expect_err("window");
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
