//! Typed error types for taborder.
//!
//! Tracker operations return [`TrackerError`] so callers can match on the
//! failure kind. Application glue (CLI, snapshot files) uses `anyhow` and
//! picks these up through the blanket `From` impl for `std::error::Error`.

use crate::tracker::WindowId;
use taborder_sequence::SequenceError;
use thiserror::Error;

/// Errors raised by [`RelativeOrderTracker`](crate::RelativeOrderTracker).
///
/// None of these are fatal; the tracker is left unchanged and the caller may
/// retry, e.g. after registering the window.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The operation names a window that is not registered.
    #[error("window {0} is not registered")]
    UnknownWindow(WindowId),

    /// A window or tab sequence rejected the mutation.
    #[error(transparent)]
    Sequence(#[from] SequenceError<i64>),

    /// A serialized tracker was missing fields or broke an invariant.
    #[error("malformed serialized tracker: {0}")]
    MalformedSerializedInput(String),

    /// The temporary name store failed a lookup.
    #[error("temporary store lookup failed for window {window_id}: {source}")]
    Store {
        /// Window whose name lookup failed.
        window_id: WindowId,
        /// Error reported by the store.
        #[source]
        source: anyhow::Error,
    },
}

/// Errors that can occur when loading or saving the taborder configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    #[error("Config validation error: {0}")]
    Validation(String),
}
