use super::error::RollingError;

/// Multiplier applied to every byte position of the polynomial hash.
pub const HASH_BASE: u32 = 256;

/// Prime modulus bounding the hash value.
pub const HASH_MODULUS: u32 = 5381;

/// Outcome of [`RollingWindow::slide`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slide {
    /// The window advanced by one byte and now hashes to the carried value.
    Slid(u32),
    /// No byte is left to enter the window; the window did not move.
    EndOfSequence,
}

impl Slide {
    /// Returns `true` when the window reached the end of its sequence.
    #[must_use]
    pub const fn is_end(self) -> bool {
        matches!(self, Self::EndOfSequence)
    }
}

/// Computes the polynomial hash of `bytes` from scratch.
///
/// # Examples
///
/// ```
/// use checksums::window_hash;
///
/// assert_eq!(window_hash(b""), 0);
/// assert_eq!(window_hash(b"a"), u32::from(b'a'));
/// assert_eq!(window_hash(b"ab"), (97 * 256 + 98) % 5381);
/// ```
#[must_use]
pub fn window_hash(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0, |hash, &byte| push_byte(hash, byte))
}

#[inline]
const fn push_byte(hash: u32, byte: u8) -> u32 {
    (hash * HASH_BASE + byte as u32) % HASH_MODULUS
}

/// Weight of the leading byte in a window of `size` bytes: `256^(size-1) mod 5381`.
fn leading_weight(size: usize) -> u32 {
    (1..size).fold(1, |weight, _| (weight * HASH_BASE) % HASH_MODULUS)
}

/// Polynomial hash over a fixed-size window of a borrowed byte sequence.
///
/// The window owns its hash state exclusively. Explicit repositioning rebuilds
/// the hash from the covered bytes, while [`slide`](Self::slide) updates it
/// incrementally. At every point `hash()` equals [`window_hash`] of
/// [`window()`](Self::window).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RollingWindow<'a> {
    data: &'a [u8],
    start: usize,
    size: usize,
    hash: u32,
    leading_weight: u32,
}

impl<'a> RollingWindow<'a> {
    /// Creates a window covering `data[start..start + size]`.
    ///
    /// # Errors
    ///
    /// Returns [`RollingError::EmptyWindow`] when `size` is zero and
    /// [`RollingError::OutOfRange`] when the window would extend past the end
    /// of `data`.
    ///
    /// # Examples
    ///
    /// ```
    /// use checksums::{RollingError, RollingWindow};
    ///
    /// let window = RollingWindow::new(b"abc", 1, 2).unwrap();
    /// assert_eq!(window.window(), b"bc");
    ///
    /// let err = RollingWindow::new(b"abc", 2, 2).unwrap_err();
    /// assert_eq!(err, RollingError::OutOfRange { start: 2, size: 2, len: 3 });
    /// ```
    pub fn new(data: &'a [u8], start: usize, size: usize) -> Result<Self, RollingError> {
        let mut window = Self {
            data,
            start: 0,
            size: 0,
            hash: 0,
            leading_weight: 1,
        };
        window.reposition(start, size)?;
        Ok(window)
    }

    /// Moves the window to `data[start..start + size]` and recomputes its hash.
    ///
    /// The window is left untouched when the request fails.
    ///
    /// # Errors
    ///
    /// Returns [`RollingError::EmptyWindow`] when `size` is zero and
    /// [`RollingError::OutOfRange`] when `start + size` exceeds the sequence
    /// length.
    pub fn reposition(&mut self, start: usize, size: usize) -> Result<u32, RollingError> {
        if size == 0 {
            return Err(RollingError::EmptyWindow);
        }

        let end = start
            .checked_add(size)
            .filter(|&end| end <= self.data.len())
            .ok_or(RollingError::OutOfRange {
                start,
                size,
                len: self.data.len(),
            })?;

        if size != self.size {
            self.leading_weight = leading_weight(size);
        }
        self.start = start;
        self.size = size;
        self.hash = window_hash(&self.data[start..end]);
        Ok(self.hash)
    }

    /// Advances the window by one byte.
    ///
    /// Returns [`Slide::EndOfSequence`] without moving when no byte remains to
    /// enter the window. Reaching the end is the normal way a scan finishes.
    pub fn slide(&mut self) -> Slide {
        let incoming = self.start + self.size;
        if incoming >= self.data.len() {
            return Slide::EndOfSequence;
        }

        let outgoing = (u32::from(self.data[self.start]) * self.leading_weight) % HASH_MODULUS;
        let remaining = (self.hash + HASH_MODULUS - outgoing) % HASH_MODULUS;
        self.hash = push_byte(remaining, self.data[incoming]);
        self.start += 1;
        Slide::Slid(self.hash)
    }

    /// Returns the hash of the current window.
    #[inline]
    #[must_use]
    pub const fn hash(&self) -> u32 {
        self.hash
    }

    /// Returns the offset of the first byte covered by the window.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the number of bytes covered by the window.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the bytes currently covered by the window.
    #[must_use]
    pub fn window(&self) -> &'a [u8] {
        &self.data[self.start..self.start + self.size]
    }

    /// Returns the unconsumed suffix of the sequence, starting at the window.
    #[must_use]
    pub fn remainder(&self) -> &'a [u8] {
        &self.data[self.start..]
    }

    /// Returns the whole underlying sequence.
    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_weight_matches_repeated_multiplication() {
        assert_eq!(leading_weight(1), 1);
        assert_eq!(leading_weight(2), 256);
        assert_eq!(leading_weight(3), (256 * 256) % HASH_MODULUS);
    }

    #[test]
    fn failed_reposition_keeps_previous_state() {
        let mut window = RollingWindow::new(b"abcdef", 1, 3).expect("window");
        let before = window.clone();

        assert!(window.reposition(5, 2).is_err());
        assert!(window.reposition(0, 0).is_err());
        assert_eq!(window, before);
    }

    #[test]
    fn reposition_past_usize_max_is_out_of_range() {
        let mut window = RollingWindow::new(b"abc", 0, 1).expect("window");
        let err = window.reposition(usize::MAX, 2).expect_err("overflow");
        assert!(matches!(err, RollingError::OutOfRange { .. }));
    }
}
