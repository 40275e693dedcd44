//! Subscriber installation for the rdelta binaries.
//!
//! Events are formatted by `tracing-subscriber` and written to standard error
//! so they never interleave with the delta printed on standard output.
//! Installation is idempotent: when a global subscriber already exists the
//! request is ignored, which keeps repeated CLI invocations inside one test
//! process harmless.

use super::config::VerbosityConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable consulted by [`init_tracing_with_filter`].
pub const LOG_ENV_VAR: &str = "RDELTA_LOG";

/// Install a stderr formatter recording events up to the configured level.
///
/// Returns `true` when this call installed the global subscriber.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{VerbosityConfig, init_tracing};
///
/// init_tracing(VerbosityConfig::from_verbose_level(2));
/// tracing::debug!(target: "rdelta::delta", "now visible");
/// ```
pub fn init_tracing(config: VerbosityConfig) -> bool {
    tracing_subscriber::registry()
        .with(config.level_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
        .is_ok()
}

/// Install a stderr formatter filtered by [`LOG_ENV_VAR`] when it is set.
///
/// Falls back to the level selected by `config` when the variable is absent
/// or cannot be parsed as an [`EnvFilter`] directive.
pub fn init_tracing_with_filter(config: VerbosityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::default().add_directive(config.level_filter().into()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
        .is_ok()
}
