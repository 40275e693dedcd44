use checksums::RollingWindow;
use logging::trace_classify;

use crate::policy::{MatchPolicy, effective_window, open_pair, reposition_pair};

/// Explanation chosen for a divergence, in priority order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Hypothesis {
    /// Bytes were replaced in place; both sequences advance in lock-step.
    Modified,
    /// Bytes were inserted at the front of the updated sequence.
    Added,
    /// Bytes were removed from the front of the old sequence.
    Deleted,
    /// No hypothesis resynchronized; both remainders form one substitution.
    Remainder,
}

impl Hypothesis {
    /// Returns a short lowercase label used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Modified => "modified",
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::Remainder => "remainder",
        }
    }
}

/// Offsets at which the two sequences realign after an edit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Resync {
    hypothesis: Hypothesis,
    old_offset: usize,
    new_offset: usize,
}

impl Resync {
    const fn new(hypothesis: Hypothesis, old_offset: usize, new_offset: usize) -> Self {
        Self {
            hypothesis,
            old_offset,
            new_offset,
        }
    }

    /// Hypothesis that produced this resynchronization.
    #[must_use]
    pub const fn hypothesis(&self) -> Hypothesis {
        self.hypothesis
    }

    /// Number of old bytes the edit removed.
    #[must_use]
    pub const fn old_offset(&self) -> usize {
        self.old_offset
    }

    /// Number of updated bytes the edit inserted.
    #[must_use]
    pub const fn new_offset(&self) -> usize {
        self.new_offset
    }

    /// Keeps the result only when it consumes at least one byte.
    fn advancing(self) -> Option<Self> {
        (self.old_offset + self.new_offset > 0).then_some(self)
    }
}

/// Explains why `old` and `updated` diverge at offset zero.
///
/// The hypotheses are tried in a fixed order and the first one that
/// resynchronizes wins:
///
/// 1. [`Hypothesis::Modified`]: advance both sequences together until their
///    windows agree again. Near the end windows shrink to single bytes; running
///    out of input only succeeds when both sequences end together.
/// 2. [`Hypothesis::Added`]: scan the updated sequence for the window that
///    starts the old sequence.
/// 3. [`Hypothesis::Deleted`]: scan the old sequence for the window that
///    starts the updated sequence.
/// 4. [`Hypothesis::Remainder`]: treat both sequences as one substitution.
///
/// A hypothesis that would resynchronize without consuming any byte counts as
/// failed, so the returned offsets always advance at least one sequence when
/// either is non-empty.
///
/// # Examples
///
/// ```
/// use matching::{Hypothesis, MatchPolicy, classify_edit};
///
/// let resync = classify_edit(b"world", b"hello world", 2, MatchPolicy::Verified);
/// assert_eq!(resync.hypothesis(), Hypothesis::Added);
/// assert_eq!((resync.old_offset(), resync.new_offset()), (0, 6));
/// ```
#[must_use]
pub fn classify_edit(
    old: &[u8],
    updated: &[u8],
    window_size: usize,
    policy: MatchPolicy,
) -> Resync {
    let remainder = Resync::new(Hypothesis::Remainder, old.len(), updated.len());
    if old.is_empty() || updated.is_empty() {
        return remainder;
    }

    let size = effective_window(window_size, old, updated);
    let resync = search_modified(old, updated, size, policy)
        .or_else(|| search_added(old, updated, size, policy))
        .or_else(|| search_deleted(old, updated, size, policy))
        .unwrap_or(remainder);

    trace_classify!(
        hypothesis = resync.hypothesis.as_str(),
        old_offset = resync.old_offset,
        new_offset = resync.new_offset,
        size,
        "classified divergence"
    );
    resync
}

fn search_modified(
    old: &[u8],
    updated: &[u8],
    size: usize,
    policy: MatchPolicy,
) -> Option<Resync> {
    let (mut left, mut right) = open_pair(old, updated, 0, 0, size)?;
    let mut offset = 0;

    loop {
        if policy.agree(&left, &right) {
            return Resync::new(Hypothesis::Modified, offset, offset).advancing();
        }

        offset += 1;
        let remaining = (old.len() - offset).min(updated.len() - offset);
        if remaining == 0 {
            return (old.len() == updated.len())
                .then(|| Resync::new(Hypothesis::Modified, offset, offset));
        }

        if remaining < left.size() {
            if !reposition_pair(&mut left, &mut right, offset, offset, 1) {
                return None;
            }
        } else {
            let left_end = left.slide().is_end();
            let right_end = right.slide().is_end();
            if left_end || right_end {
                return None;
            }
        }
    }
}

fn search_added(old: &[u8], updated: &[u8], size: usize, policy: MatchPolicy) -> Option<Resync> {
    let (anchor, scan) = open_pair(old, updated, 0, 0, size)?;
    scan_for_anchor(&anchor, scan, policy)
        .and_then(|skipped| Resync::new(Hypothesis::Added, 0, skipped).advancing())
}

fn search_deleted(
    old: &[u8],
    updated: &[u8],
    size: usize,
    policy: MatchPolicy,
) -> Option<Resync> {
    let (scan, anchor) = open_pair(old, updated, 0, 0, size)?;
    scan_for_anchor(&anchor, scan, policy)
        .and_then(|skipped| Resync::new(Hypothesis::Deleted, skipped, 0).advancing())
}

/// Slides `scan` forward until it agrees with `anchor`, returning the number
/// of bytes skipped.
fn scan_for_anchor(
    anchor: &RollingWindow<'_>,
    mut scan: RollingWindow<'_>,
    policy: MatchPolicy,
) -> Option<usize> {
    loop {
        if policy.agree(anchor, &scan) {
            return Some(scan.start());
        }
        if scan.slide().is_end() {
            return None;
        }
    }
}
