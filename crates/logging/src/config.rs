//! Verbosity configuration derived from the command line.

use tracing::Level;
use tracing::level_filters::LevelFilter;

/// Highest verbose level with a distinct meaning; larger counts saturate.
const MAX_VERBOSE_LEVEL: u8 = 3;

/// Verbosity selected by the user, expressed as a count of `-v` flags.
///
/// | Level | Events shown |
/// |-------|--------------|
/// | 0 | warnings and errors |
/// | 1 | + info |
/// | 2 | + debug (classified edits, codec activity) |
/// | 3 | + trace (every divergence probe) |
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    level: u8,
}

impl VerbosityConfig {
    /// Create a configuration from a verbose level, saturating above 3.
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        let level = if level > MAX_VERBOSE_LEVEL {
            MAX_VERBOSE_LEVEL
        } else {
            level
        };
        Self { level }
    }

    /// Returns the normalized verbose level.
    #[must_use]
    pub const fn verbose_level(self) -> u8 {
        self.level
    }

    /// Returns the most detailed `tracing` level this configuration records.
    #[must_use]
    pub const fn level(self) -> Level {
        match self.level {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Returns the level as a filter for subscriber construction.
    #[must_use]
    pub fn level_filter(self) -> LevelFilter {
        LevelFilter::from_level(self.level())
    }

    /// Returns `true` when events at `level` would be recorded.
    #[must_use]
    pub fn enabled(self, level: Level) -> bool {
        level <= self.level()
    }
}
