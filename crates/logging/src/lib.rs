#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` carries the diagnostics plumbing shared by the rdelta workspace:
//! a [`VerbosityConfig`] derived from the number of `-v` flags, the
//! [`init_tracing`] helpers that install a `tracing-subscriber` formatter on
//! standard error, and target-scoped macros used by the comparison engine.
//!
//! # Targets
//!
//! | Macro | Target | Level |
//! |-------|--------|-------|
//! | [`trace_locate!`] | `rdelta::locate` | trace |
//! | [`trace_classify!`] | `rdelta::classify` | debug |
//! | [`trace_delta!`] | `rdelta::delta` | debug |
//! | [`trace_codec!`] | `rdelta::codec` | debug |
//!
//! Crates using the macros must depend on `tracing` themselves, since the
//! expansions call `::tracing` directly.
//!
//! # Examples
//!
//! ```
//! use logging::VerbosityConfig;
//! use tracing::Level;
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! assert_eq!(config.level(), Level::DEBUG);
//! ```

mod config;
mod tracing_bridge;
mod tracing_macros;

pub use config::VerbosityConfig;
pub use tracing_bridge::{LOG_ENV_VAR, init_tracing, init_tracing_with_filter};
