use checksums::Slide;
use logging::trace_locate;

use crate::policy::{MatchPolicy, effective_window, open_pair, reposition_pair};

/// Result of [`locate_first_difference`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Divergence {
    equal_prefix: usize,
    exhausted: bool,
}

impl Divergence {
    const fn at(offset: usize) -> Self {
        Self {
            equal_prefix: offset,
            exhausted: false,
        }
    }

    const fn exhausted(scanned: usize) -> Self {
        Self {
            equal_prefix: scanned,
            exhausted: true,
        }
    }

    /// Number of leading bytes both sequences share.
    ///
    /// For a non-exhausted divergence this is the offset of the first
    /// differing byte.
    #[must_use]
    pub const fn equal_prefix(&self) -> usize {
        self.equal_prefix
    }

    /// Returns `true` when the scan ran out of bytes before finding a difference.
    ///
    /// The shorter sequence is then entirely a prefix of the longer one and
    /// whatever remains is a pure trailing insertion or deletion.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Finds the first offset at which `old` and `updated` differ.
///
/// Both sequences are scanned with rolling windows of `window_size` bytes
/// (single-byte windows when either sequence is not longer than the requested
/// size). The leading byte is always compared on its own first. When a full
/// window disagrees, windows of growing size anchored at the mismatching
/// offset pin the exact byte that differs.
///
/// # Examples
///
/// ```
/// use matching::{MatchPolicy, locate_first_difference};
///
/// let found = locate_first_difference(b"hello world", b"hello there", 3, MatchPolicy::Verified);
/// assert_eq!(found.equal_prefix(), 6);
/// assert!(!found.is_exhausted());
///
/// let found = locate_first_difference(b"hello", b"hello world", 3, MatchPolicy::Verified);
/// assert_eq!(found.equal_prefix(), 5);
/// assert!(found.is_exhausted());
/// ```
#[must_use]
pub fn locate_first_difference(
    old: &[u8],
    updated: &[u8],
    window_size: usize,
    policy: MatchPolicy,
) -> Divergence {
    if old.is_empty() || updated.is_empty() {
        return Divergence::exhausted(0);
    }

    let Some((mut left, mut right)) = open_pair(old, updated, 0, 0, 1) else {
        return Divergence::exhausted(0);
    };
    if !policy.agree(&left, &right) {
        trace_locate!("leading byte differs");
        return Divergence::at(0);
    }

    let size = effective_window(window_size, old, updated);
    if size > 1 && !reposition_pair(&mut left, &mut right, 0, 0, size) {
        return Divergence::at(0);
    }

    loop {
        if !policy.agree(&left, &right) {
            let start = left.start();
            trace_locate!(start, size, "window mismatch, narrowing");
            return Divergence::at(pinpoint(&mut left, &mut right, start, size, policy));
        }

        let scanned = left.start() + size;
        match (left.slide(), right.slide()) {
            (Slide::Slid(_), Slide::Slid(_)) => {}
            _ => {
                trace_locate!(scanned, "no divergence before end of input");
                return Divergence::exhausted(scanned);
            }
        }
    }
}

/// Returns the offset of the first differing byte inside the disagreeing
/// window `[start, start + size)`.
///
/// Windows anchored at `start` grow one byte at a time; the first one that
/// disagrees ends on the differing byte.
fn pinpoint(
    left: &mut checksums::RollingWindow<'_>,
    right: &mut checksums::RollingWindow<'_>,
    start: usize,
    size: usize,
    policy: MatchPolicy,
) -> usize {
    for narrowed in 1..=size {
        if !reposition_pair(left, right, start, start, narrowed) || !policy.agree(left, right) {
            return start + narrowed - 1;
        }
    }
    start + size - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(old: &str, updated: &str, window: usize) -> Divergence {
        locate_first_difference(old.as_bytes(), updated.as_bytes(), window, MatchPolicy::Verified)
    }

    #[test]
    fn leading_difference_is_reported_at_zero() {
        let found = locate("hello", "jello", 4);
        assert_eq!(found, Divergence::at(0));
    }

    #[test]
    fn difference_inside_first_window_is_pinpointed() {
        for window in 1..=6 {
            assert_eq!(locate("abcdefgh", "abcXefgh", window), Divergence::at(3), "w={window}");
        }
    }

    #[test]
    fn difference_after_several_slides_is_pinpointed() {
        let found = locate("the quick brown fox", "the quick brawn fox", 4);
        assert_eq!(found, Divergence::at(12));
    }

    #[test]
    fn difference_on_last_byte_is_found() {
        assert_eq!(locate("hello world", "hello worlx", 2), Divergence::at(10));
        assert_eq!(locate("hello world", "hello worlx", 1), Divergence::at(10));
    }

    #[test]
    fn identical_inputs_are_exhausted_at_full_length() {
        assert_eq!(locate("same", "same", 2), Divergence::exhausted(4));
        assert_eq!(locate("same", "same", 9), Divergence::exhausted(4));
    }

    #[test]
    fn prefix_inputs_are_exhausted_at_shorter_length() {
        assert_eq!(locate("hello world", "hello", 2), Divergence::exhausted(5));
        assert_eq!(locate("abc", "abcdef", 2), Divergence::exhausted(3));
    }

    #[test]
    fn empty_input_is_exhausted_immediately() {
        assert_eq!(locate("", "abc", 2), Divergence::exhausted(0));
        assert_eq!(locate("abc", "", 2), Divergence::exhausted(0));
    }

    #[test]
    fn oversized_window_falls_back_to_single_bytes() {
        assert_eq!(locate("ab", "ax", 50), Divergence::at(1));
    }

    #[test]
    fn hash_only_policy_misses_colliding_windows() {
        // 0x15 * 256 + 0x05 == 5381, so both three-byte windows collide.
        let old = [b'a', 0x00, 0x00, b'z'];
        let updated = [b'a', 0x15, 0x05, b'z'];

        let trusting = locate_first_difference(&old, &updated, 3, MatchPolicy::HashOnly);
        let verified = locate_first_difference(&old, &updated, 3, MatchPolicy::Verified);

        assert_eq!(trusting, Divergence::exhausted(4));
        assert_eq!(verified, Divergence::at(1));
    }
}
