#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Rolling-hash text comparison and textual deltas.
//!
//! This crate turns two byte sequences, an *old* and an *updated* version,
//! into an ordered list of edit records and back:
//! - [`locate_first_difference`] finds the first byte where two sequences differ
//! - [`classify_edit`] explains a divergence as a modification, an addition or a
//!   deletion and reports where the sequences resynchronize
//! - [`DeltaBuilder`] drives both until the inputs are exhausted, producing a [`Delta`]
//! - [`serialize_delta`], [`parse_delta`] and [`apply_delta`] implement the
//!   `Start character:` text format and reconstruction
//!
//! # Design
//!
//! Every comparison uses [`checksums::RollingWindow`] instead of an alignment
//! matrix. The scan is a linear heuristic: it does not promise a minimal edit
//! script, only one that reconstructs the updated text exactly. Hash agreement
//! is confirmed against the bytes unless [`MatchPolicy::HashOnly`] is selected.
//!
//! # Examples
//!
//! ```
//! use matching::{apply_delta, compare, serialize_delta};
//!
//! let delta = compare("hello world", "jello world", 2);
//! let text = serialize_delta(&delta);
//! assert_eq!(text, b"Start character: 1 [--- h][+++ j]");
//! assert_eq!(apply_delta("hello world", &text), b"jello world");
//! ```

mod builder;
mod classifier;
mod codec;
mod error;
mod locator;
mod policy;
mod script;

pub use builder::{DeltaBuilder, compare};
pub use classifier::{Hypothesis, Resync, classify_edit};
pub use codec::{apply_delta, parse_delta, serialize_delta, try_apply_delta, write_delta};
pub use error::MalformedDelta;
pub use locator::{Divergence, locate_first_difference};
pub use policy::MatchPolicy;
pub use script::{Delta, EditKind, EditRecord};
