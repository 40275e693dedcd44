use std::io::{self, Write};

use matching::{Delta, write_delta};

use crate::input::Comparison;

/// Prints both texts followed by the serialized delta.
pub(crate) fn comparison_report<W: Write>(
    out: &mut W,
    comparison: &Comparison,
    delta: &Delta<'_>,
) -> io::Result<()> {
    labeled_line(out, "Old text:", &comparison.old)?;
    labeled_line(out, "Updated text:", &comparison.updated)?;
    writeln!(out, "Comparison result:")?;
    write_delta(delta, &mut *out)?;
    out.write_all(b"\n")
}

fn labeled_line<W: Write>(out: &mut W, label: &str, text: &[u8]) -> io::Result<()> {
    write!(out, "{label} ")?;
    bytes_line(out, text)
}

/// Writes `text` unchanged followed by a newline.
pub(crate) fn bytes_line<W: Write>(out: &mut W, text: &[u8]) -> io::Result<()> {
    out.write_all(text)?;
    out.write_all(b"\n")
}
