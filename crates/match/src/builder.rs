use logging::trace_delta;

use crate::classifier::classify_edit;
use crate::locator::locate_first_difference;
use crate::policy::MatchPolicy;
use crate::script::{Delta, EditRecord};

/// Builds [`Delta`] values from an old and an updated sequence.
///
/// The builder alternates between locating the next divergence and
/// classifying it until both sequences are consumed. Records borrow their
/// payloads from the inputs.
///
/// # Examples
///
/// ```
/// use matching::{DeltaBuilder, EditKind, MatchPolicy};
///
/// let builder = DeltaBuilder::new()
///     .with_window_size(4)
///     .with_policy(MatchPolicy::Verified);
/// let delta = builder.build("hello world", "hello brave world");
///
/// assert_eq!(delta.len(), 1);
/// assert_eq!(delta.records()[0].kind(), EditKind::Insertion);
/// assert_eq!(delta.apply(b"hello world").unwrap(), b"hello brave world");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DeltaBuilder {
    window_size: usize,
    policy: MatchPolicy,
}

impl DeltaBuilder {
    /// Window size used when none is configured.
    pub const DEFAULT_WINDOW_SIZE: usize = 1;

    /// Creates a builder with single-byte windows and verified matching.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            window_size: Self::DEFAULT_WINDOW_SIZE,
            policy: MatchPolicy::Verified,
        }
    }

    /// Sets the rolling window size. Zero is treated as one.
    #[must_use]
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size.max(1);
        self
    }

    /// Sets how equal window hashes are confirmed.
    #[must_use]
    pub const fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured window size.
    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the configured match policy.
    #[must_use]
    pub const fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Computes the delta that turns `old` into `updated`.
    ///
    /// Identical inputs produce an empty delta. Under
    /// [`MatchPolicy::Verified`] applying the result to `old` always yields
    /// `updated`.
    pub fn build<'a, O, U>(&self, old: &'a O, updated: &'a U) -> Delta<'a>
    where
        O: AsRef<[u8]> + ?Sized,
        U: AsRef<[u8]> + ?Sized,
    {
        let old = old.as_ref();
        let updated = updated.as_ref();
        let span = tracing::debug_span!(
            target: "rdelta::delta",
            "build",
            old_len = old.len(),
            new_len = updated.len(),
            window = self.window_size
        );
        let _enter = span.enter();

        let mut records = Vec::new();
        let mut old_pos = 0;
        let mut new_pos = 0;

        loop {
            let old_view = &old[old_pos..];
            let new_view = &updated[new_pos..];
            if old_view.is_empty() && new_view.is_empty() {
                break;
            }
            if old_view.is_empty() || new_view.is_empty() {
                trace_delta!(
                    start = old_pos + 1,
                    removed = old_view.len(),
                    inserted = new_view.len(),
                    "trailing edit"
                );
                records.push(EditRecord::new(old_pos + 1, old_view, new_view));
                break;
            }

            let divergence =
                locate_first_difference(old_view, new_view, self.window_size, self.policy);
            old_pos += divergence.equal_prefix();
            new_pos += divergence.equal_prefix();
            if divergence.is_exhausted() {
                debug_assert!(divergence.equal_prefix() > 0, "exhausted scan made no progress");
                continue;
            }

            let resync = classify_edit(
                &old[old_pos..],
                &updated[new_pos..],
                self.window_size,
                self.policy,
            );
            debug_assert!(
                resync.old_offset() + resync.new_offset() > 0,
                "classified edit at {old_pos} made no progress"
            );

            let removed = &old[old_pos..old_pos + resync.old_offset()];
            let inserted = &updated[new_pos..new_pos + resync.new_offset()];
            trace_delta!(
                start = old_pos + 1,
                hypothesis = resync.hypothesis().as_str(),
                removed = removed.len(),
                inserted = inserted.len(),
                "edit"
            );
            records.push(EditRecord::new(old_pos + 1, removed, inserted));
            old_pos += resync.old_offset();
            new_pos += resync.new_offset();
        }

        trace_delta!(records = records.len(), "delta complete");
        Delta::new(records)
    }
}

impl Default for DeltaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the delta between `old` and `updated` with verified matching.
///
/// Shorthand for `DeltaBuilder::new().with_window_size(window_size).build(old, updated)`.
#[must_use]
pub fn compare<'a, O, U>(old: &'a O, updated: &'a U, window_size: usize) -> Delta<'a>
where
    O: AsRef<[u8]> + ?Sized,
    U: AsRef<[u8]> + ?Sized,
{
    DeltaBuilder::new()
        .with_window_size(window_size)
        .build(old, updated)
}
