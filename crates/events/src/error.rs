//! Error types for the events crate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for event store and projection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the event store.
///
/// "No matching event" is never an error: reads return empty collections or
/// `None`, and projections fold an empty history into their sentinel state.
#[derive(Debug, Error)]
pub enum Error {
    /// The backing storage could not be read or written.
    #[error("io failure on {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted record could not be decoded.
    ///
    /// A corrupt store is reported as corrupt, never as empty.
    #[error("corrupt event record at {}: {}", path.display(), source)]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An event could not be serialized for persistence.
    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),

    /// The event failed a structural precondition.
    #[error("invalid event: {reason}")]
    InvalidEvent { reason: String },
}

impl Error {
    /// Create an io error tagged with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error tagged with the offending record's path.
    pub fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid event error.
    pub fn invalid_event(reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            reason: reason.into(),
        }
    }
}
