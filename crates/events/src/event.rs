//! Domain events for the Open Space workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EventId, EventKind};

/// Immutable facts recorded by the Open Space workflow.
///
/// The serialized form is the durable contract: a flat JSON object tagged by
/// `type`, payload keys in camelCase. Events carry their id (the idempotency
/// key) and the timestamp assigned once at creation; neither is ever revised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SpaceEvent {
    /// The space was given a name. The latest of these wins.
    #[serde(rename = "OpenSpaceNamedEvent", rename_all = "camelCase")]
    SpaceNamed {
        id: EventId,
        space_name: String,
        timestamp: DateTime<Utc>,
    },
    /// The space's start and end dates were set.
    ///
    /// Dates are kept as the caller-supplied strings; the store does not
    /// interpret them.
    #[serde(rename = "DateRangeSetEvent", rename_all = "camelCase")]
    DateRangeSet {
        id: EventId,
        start_date: String,
        end_date: String,
        timestamp: DateTime<Utc>,
    },
    /// Somebody submitted a topic. Every submission becomes a session.
    #[serde(rename = "TopicSubmittedEvent", rename_all = "camelCase")]
    TopicSubmitted {
        id: EventId,
        name: String,
        category: String,
        topic: String,
        timestamp: DateTime<Utc>,
    },
}

impl SpaceEvent {
    /// Create a new SpaceNamed event.
    pub fn space_named(
        id: EventId,
        space_name: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::SpaceNamed {
            id,
            space_name: space_name.into(),
            timestamp,
        }
    }

    /// Create a new DateRangeSet event.
    pub fn date_range_set(
        id: EventId,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::DateRangeSet {
            id,
            start_date: start_date.into(),
            end_date: end_date.into(),
            timestamp,
        }
    }

    /// Create a new TopicSubmitted event.
    pub fn topic_submitted(
        id: EventId,
        name: impl Into<String>,
        category: impl Into<String>,
        topic: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::TopicSubmitted {
            id,
            name: name.into(),
            category: category.into(),
            topic: topic.into(),
            timestamp,
        }
    }

    /// Get the event id.
    pub fn id(&self) -> &EventId {
        match self {
            Self::SpaceNamed { id, .. }
            | Self::DateRangeSet { id, .. }
            | Self::TopicSubmitted { id, .. } => id,
        }
    }

    /// Get the timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SpaceNamed { timestamp, .. }
            | Self::DateRangeSet { timestamp, .. }
            | Self::TopicSubmitted { timestamp, .. } => *timestamp,
        }
    }

    /// Get the event kind.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::SpaceNamed { .. } => EventKind::SpaceNamed,
            Self::DateRangeSet { .. } => EventKind::DateRangeSet,
            Self::TopicSubmitted { .. } => EventKind::TopicSubmitted,
        }
    }

    /// Get the wire tag of this event's kind.
    pub fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }
}
