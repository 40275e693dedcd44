#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod rolling;

pub use rolling::{HASH_BASE, HASH_MODULUS, RollingError, RollingWindow, Slide, window_hash};
