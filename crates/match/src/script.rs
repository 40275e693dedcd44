use std::borrow::Cow;
use std::fmt;

use crate::error::MalformedDelta;

/// Kind of change described by an [`EditRecord`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EditKind {
    /// Bytes were added; nothing was removed.
    Insertion,
    /// Bytes were removed; nothing was added.
    Deletion,
    /// Bytes were removed and replaced with different bytes.
    Substitution,
}

/// One edit of a [`Delta`]: replace `removed` at `start` with `inserted`.
///
/// `start` is 1-based and always refers to the original old sequence, never to
/// a partially reconstructed one. At least one of `removed` and `inserted` is
/// non-empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditRecord<'a> {
    start: usize,
    removed: Cow<'a, [u8]>,
    inserted: Cow<'a, [u8]>,
}

impl<'a> EditRecord<'a> {
    pub(crate) fn new(
        start: usize,
        removed: impl Into<Cow<'a, [u8]>>,
        inserted: impl Into<Cow<'a, [u8]>>,
    ) -> Self {
        let record = Self {
            start,
            removed: removed.into(),
            inserted: inserted.into(),
        };
        debug_assert!(record.start > 0, "edit records are 1-based");
        debug_assert!(
            !record.removed.is_empty() || !record.inserted.is_empty(),
            "edit record at {start} carries no change"
        );
        record
    }

    /// 1-based position of the first removed byte in the old sequence.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// 0-based offset of the first removed byte in the old sequence.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.start - 1
    }

    /// Bytes removed from the old sequence.
    #[must_use]
    pub fn removed(&self) -> &[u8] {
        &self.removed
    }

    /// Bytes inserted in their place.
    #[must_use]
    pub fn inserted(&self) -> &[u8] {
        &self.inserted
    }

    /// Classifies the record by which side carries bytes.
    #[must_use]
    pub fn kind(&self) -> EditKind {
        match (self.removed.is_empty(), self.inserted.is_empty()) {
            (true, _) => EditKind::Insertion,
            (false, true) => EditKind::Deletion,
            (false, false) => EditKind::Substitution,
        }
    }

    /// Detaches the record from the buffers it borrows from.
    #[must_use]
    pub fn into_owned(self) -> EditRecord<'static> {
        EditRecord {
            start: self.start,
            removed: Cow::Owned(self.removed.into_owned()),
            inserted: Cow::Owned(self.inserted.into_owned()),
        }
    }
}

/// Ordered list of [`EditRecord`] values that turns an old sequence into an
/// updated one.
///
/// Records appear in discovery order, left to right through the old sequence,
/// and never overlap.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Delta<'a> {
    records: Vec<EditRecord<'a>>,
}

impl<'a> Delta<'a> {
    pub(crate) const fn new(records: Vec<EditRecord<'a>>) -> Self {
        Self { records }
    }

    /// Returns the records in application order.
    #[must_use]
    pub fn records(&self) -> &[EditRecord<'a>] {
        &self.records
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, EditRecord<'a>> {
        self.records.iter()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the two sequences were identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of bytes removed from the old sequence.
    #[must_use]
    pub fn removed_bytes(&self) -> usize {
        self.records.iter().map(|record| record.removed.len()).sum()
    }

    /// Total number of bytes inserted into the old sequence.
    #[must_use]
    pub fn inserted_bytes(&self) -> usize {
        self.records.iter().map(|record| record.inserted.len()).sum()
    }

    /// Detaches every record from the buffers it borrows from.
    #[must_use]
    pub fn into_owned(self) -> Delta<'static> {
        Delta {
            records: self
                .records
                .into_iter()
                .map(EditRecord::into_owned)
                .collect(),
        }
    }

    /// Rebuilds the updated sequence by applying every record to `old`.
    ///
    /// Unchanged stretches of `old` are copied through; each record's
    /// `removed` bytes must be present at its offset.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedDelta::OutOfOrder`] when a record starts inside an
    /// earlier one, [`MalformedDelta::OutOfRange`] when a removal runs past the
    /// end of `old`, and [`MalformedDelta::RemovedMismatch`] when the removed
    /// bytes differ from `old` at that position.
    pub fn apply(&self, old: &[u8]) -> Result<Vec<u8>, MalformedDelta> {
        let capacity = (old.len() + self.inserted_bytes()).saturating_sub(self.removed_bytes());
        let mut output = Vec::with_capacity(capacity);
        let mut cursor = 0usize;

        for (index, record) in self.records.iter().enumerate() {
            let number = index + 1;
            let offset = record.offset();
            if offset < cursor {
                return Err(MalformedDelta::OutOfOrder {
                    record: number,
                    start: record.start,
                });
            }

            let end = offset
                .checked_add(record.removed.len())
                .filter(|&end| end <= old.len())
                .ok_or(MalformedDelta::OutOfRange {
                    record: number,
                    start: record.start,
                    len: old.len(),
                })?;
            if old[offset..end] != *record.removed {
                return Err(MalformedDelta::RemovedMismatch {
                    record: number,
                    start: record.start,
                });
            }

            output.extend_from_slice(&old[cursor..offset]);
            output.extend_from_slice(&record.inserted);
            cursor = end;
        }

        output.extend_from_slice(&old[cursor..]);
        Ok(output)
    }
}

impl<'d, 'a> IntoIterator for &'d Delta<'a> {
    type Item = &'d EditRecord<'a>;
    type IntoIter = std::slice::Iter<'d, EditRecord<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<'a> IntoIterator for Delta<'a> {
    type Item = EditRecord<'a>;
    type IntoIter = std::vec::IntoIter<EditRecord<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl fmt::Display for Delta<'_> {
    /// Renders the serialized delta, replacing invalid UTF-8 for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&crate::codec::serialize_delta(self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(start: usize, removed: &'static str, inserted: &'static str) -> EditRecord<'static> {
        EditRecord::new(start, removed.as_bytes(), inserted.as_bytes())
    }

    #[test]
    fn kind_follows_payloads() {
        assert_eq!(record(1, "", "x").kind(), EditKind::Insertion);
        assert_eq!(record(1, "x", "").kind(), EditKind::Deletion);
        assert_eq!(record(1, "x", "y").kind(), EditKind::Substitution);
    }

    #[test]
    fn apply_uses_original_offsets() {
        let delta = Delta::new(vec![record(1, "h", "j"), record(7, "w", "W"), record(12, "", "!")]);
        assert_eq!(delta.apply(b"hello world").expect("apply"), b"jello World!");
        assert_eq!(delta.removed_bytes(), 2);
        assert_eq!(delta.inserted_bytes(), 3);
    }

    #[test]
    fn adjacent_records_are_accepted() {
        let delta = Delta::new(vec![record(1, "ab", ""), record(3, "", "xy")]);
        assert_eq!(delta.apply(b"abc").expect("apply"), b"xyc");
    }

    #[test]
    fn overlapping_records_are_rejected() {
        let delta = Delta::new(vec![record(1, "abc", ""), record(2, "b", "")]);
        assert_eq!(
            delta.apply(b"abcd"),
            Err(MalformedDelta::OutOfOrder { record: 2, start: 2 })
        );
    }

    #[test]
    fn removal_past_the_end_is_rejected() {
        let delta = Delta::new(vec![record(3, "cd", "")]);
        assert_eq!(
            delta.apply(b"abc"),
            Err(MalformedDelta::OutOfRange {
                record: 1,
                start: 3,
                len: 3
            })
        );
    }

    #[test]
    fn mismatched_removal_is_rejected() {
        let delta = Delta::new(vec![record(2, "x", "y")]);
        assert_eq!(
            delta.apply(b"abc"),
            Err(MalformedDelta::RemovedMismatch { record: 1, start: 2 })
        );
    }

    #[test]
    fn owned_delta_outlives_inputs() {
        let owned = {
            let old = String::from("abc");
            let delta = Delta::new(vec![EditRecord::new(1, &old.as_bytes()[..1], &b"z"[..])]);
            delta.into_owned()
        };
        assert_eq!(owned.records()[0].removed(), b"a");
    }
}
