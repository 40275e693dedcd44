//! Target-scoped tracing macros for the comparison engine.

/// Emit a divergence-locator trace.
///
/// # Example
/// ```ignore
/// trace_locate!("window mismatch at {}", offset);
/// ```
#[macro_export]
macro_rules! trace_locate {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "rdelta::locate", $($arg)*);
    };
}

/// Emit an edit-classification trace.
///
/// # Example
/// ```ignore
/// trace_classify!("added hypothesis resynchronized at {}", offset);
/// ```
#[macro_export]
macro_rules! trace_classify {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "rdelta::classify", $($arg)*);
    };
}

/// Emit a delta-construction trace.
///
/// # Example
/// ```ignore
/// trace_delta!("emitted record at {}", start);
/// ```
#[macro_export]
macro_rules! trace_delta {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "rdelta::delta", $($arg)*);
    };
}

/// Emit a delta serialization or reconstruction trace.
///
/// # Example
/// ```ignore
/// trace_codec!("parsed {} records", count);
/// ```
#[macro_export]
macro_rules! trace_codec {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "rdelta::codec", $($arg)*);
    };
}
