use thiserror::Error;

/// Errors raised while positioning a [`RollingWindow`](super::RollingWindow).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RollingError {
    /// The requested window does not contain any bytes.
    #[error("rolling window requires a non-empty window")]
    EmptyWindow,
    /// The requested window extends past the end of the sequence.
    #[error("rolling window [{start}, {start}+{size}) exceeds sequence length {len}")]
    OutOfRange {
        /// First byte the window would cover.
        start: usize,
        /// Number of bytes the window would cover.
        size: usize,
        /// Length of the underlying sequence.
        len: usize,
    },
}
