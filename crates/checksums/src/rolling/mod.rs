//! Rolling window hash used to locate divergences between two byte sequences.
//!
//! The hash is a base-256 polynomial reduced modulo a small prime, so a window
//! of `size` bytes starting at `start` hashes to
//! `Σ data[i] · 256^(start + size - 1 - i) mod 5381`. Sliding the window one byte
//! forward removes the outgoing byte's weighted contribution, shifts the
//! remaining bytes up by one power of the base and appends the incoming byte,
//! all in O(1).
//!
//! # Collisions
//!
//! With a modulus of 5381 distinct windows collide easily once they span more
//! than one byte. Single-byte windows never collide because every byte value is
//! below the modulus. Callers decide whether a hash agreement is trusted or
//! confirmed against the underlying bytes.
//!
//! # Example
//!
//! ```rust
//! use checksums::{RollingWindow, Slide};
//!
//! let mut window = RollingWindow::new(b"abcd", 0, 2).unwrap();
//! let first = window.hash();
//!
//! assert!(matches!(window.slide(), Slide::Slid(_)));
//! assert!(matches!(window.slide(), Slide::Slid(_)));
//! assert_eq!(window.slide(), Slide::EndOfSequence);
//! assert_ne!(window.hash(), first);
//! ```

mod error;
mod window;

pub use error::RollingError;
pub use window::{HASH_BASE, HASH_MODULUS, RollingWindow, Slide, window_hash};

#[cfg(test)]
mod tests;
