use thiserror::Error;

/// Errors raised when a textual delta cannot be parsed or applied.
///
/// Parsing errors carry the 1-based line of the delta text; application errors
/// carry the 1-based position of the offending record.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MalformedDelta {
    /// The line does not begin with `Start character: `.
    #[error("line {line}: missing `Start character:` marker")]
    MissingMarker {
        /// Line of the delta text.
        line: usize,
    },
    /// The start index is not a positive decimal integer.
    #[error("line {line}: invalid start index `{value}`")]
    InvalidIndex {
        /// Line of the delta text.
        line: usize,
        /// Text found where the index was expected.
        value: String,
    },
    /// A `[--- ` or `[+++ ` section has no closing bracket.
    #[error("line {line}: unterminated section")]
    UnterminatedSection {
        /// Line of the delta text.
        line: usize,
    },
    /// A backslash is followed by something other than `\`, `]`, `n` or `r`.
    #[error("line {line}: invalid escape sequence")]
    InvalidEscape {
        /// Line of the delta text.
        line: usize,
    },
    /// Bytes that belong to no section were found.
    #[error("line {line}, column {column}: unexpected content")]
    UnexpectedContent {
        /// Line of the delta text.
        line: usize,
        /// 1-based byte column of the first unexpected byte.
        column: usize,
    },
    /// The record neither removes nor inserts anything.
    #[error("line {line}: record has neither removed nor inserted content")]
    EmptyRecord {
        /// Line of the delta text.
        line: usize,
    },
    /// The record starts before the end of the previous one.
    #[error("record {record}: start {start} overlaps the previous record")]
    OutOfOrder {
        /// Position of the record in the delta.
        record: usize,
        /// 1-based start index of the record.
        start: usize,
    },
    /// The removal extends past the end of the old text.
    #[error("record {record}: removal at {start} exceeds old text of {len} bytes")]
    OutOfRange {
        /// Position of the record in the delta.
        record: usize,
        /// 1-based start index of the record.
        start: usize,
        /// Length of the old text.
        len: usize,
    },
    /// The removed bytes are not what the old text holds at that position.
    #[error("record {record}: removed content does not match old text at {start}")]
    RemovedMismatch {
        /// Position of the record in the delta.
        record: usize,
        /// 1-based start index of the record.
        start: usize,
    },
}
