use checksums::RollingWindow;

/// Decides whether two windows with equal hashes are treated as equal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MatchPolicy {
    /// Equal hashes are confirmed by comparing the covered bytes.
    ///
    /// Deltas built under this policy always reconstruct the updated text.
    #[default]
    Verified,
    /// Equal hashes are trusted without looking at the bytes.
    ///
    /// Hash collisions can hide a difference, in which case the resulting
    /// delta does not reconstruct the updated text.
    HashOnly,
}

impl MatchPolicy {
    /// Returns `true` when the two windows are considered equal.
    pub(crate) fn agree(self, left: &RollingWindow<'_>, right: &RollingWindow<'_>) -> bool {
        left.hash() == right.hash() && (self == Self::HashOnly || left.window() == right.window())
    }
}

/// Window size actually used for a pair of operands.
///
/// Falls back to single-byte windows whenever either operand is not longer
/// than the requested size.
pub(crate) fn effective_window(requested: usize, old: &[u8], updated: &[u8]) -> usize {
    if old.len() <= requested || updated.len() <= requested {
        1
    } else {
        requested.max(1)
    }
}

/// Moves both windows to the given offsets with a common size.
///
/// Returns `false` when either request falls outside its sequence. Callers
/// size their windows from the operand lengths, so a failure is a logic error.
pub(crate) fn reposition_pair(
    left: &mut RollingWindow<'_>,
    right: &mut RollingWindow<'_>,
    left_start: usize,
    right_start: usize,
    size: usize,
) -> bool {
    let positioned = left.reposition(left_start, size).is_ok()
        && right.reposition(right_start, size).is_ok();
    debug_assert!(
        positioned,
        "window [{left_start}|{right_start}, +{size}) outside operands of {} and {} bytes",
        left.data().len(),
        right.data().len()
    );
    positioned
}

/// Opens a pair of windows at the given offsets.
pub(crate) fn open_pair<'a>(
    left: &'a [u8],
    right: &'a [u8],
    left_start: usize,
    right_start: usize,
    size: usize,
) -> Option<(RollingWindow<'a>, RollingWindow<'a>)> {
    let pair = RollingWindow::new(left, left_start, size)
        .and_then(|l| RollingWindow::new(right, right_start, size).map(|r| (l, r)));
    debug_assert!(pair.is_ok(), "failed to open window pair: {pair:?}");
    pair.ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_window_falls_back_to_one() {
        assert_eq!(effective_window(4, b"abcde", b"abcdef"), 4);
        assert_eq!(effective_window(4, b"abcd", b"abcdef"), 1);
        assert_eq!(effective_window(4, b"abcdef", b"ab"), 1);
        assert_eq!(effective_window(0, b"abc", b"abc"), 1);
        assert_eq!(effective_window(1, b"a", b"b"), 1);
    }

    #[test]
    fn verified_policy_rejects_collisions() {
        let left = [0x00u8, 0x00];
        let right = [0x15u8, 0x05];
        let (l, r) = open_pair(&left, &right, 0, 0, 2).expect("pair");

        assert_eq!(l.hash(), r.hash());
        assert!(MatchPolicy::HashOnly.agree(&l, &r));
        assert!(!MatchPolicy::Verified.agree(&l, &r));
    }
}
