//! Core identifier types for the events crate.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for an event, supplied by the producer.
///
/// The id doubles as the idempotency key: submitting the same id more than
/// once has the same durable effect as submitting it once. Producers that
/// need a fresh key mint one with [`EventId::generate`] and carry it through
/// retries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wrap a caller-supplied id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh unique id.
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// The closed set of event kinds this system records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The space was given a name.
    SpaceNamed,
    /// The space's date range was set.
    DateRangeSet,
    /// A topic was submitted.
    TopicSubmitted,
}

impl EventKind {
    /// The tag stored in durable records and embedded in record names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpaceNamed => "OpenSpaceNamedEvent",
            Self::DateRangeSet => "DateRangeSetEvent",
            Self::TopicSubmitted => "TopicSubmittedEvent",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
