//! State views folded from the event history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::event::SpaceEvent;
use crate::query::EventQuery;
use crate::store::EventStore;
use crate::types::EventKind;

/// A pure fold from the event history to a current-state view.
///
/// Projections never touch storage directly: `rebuild` fetches events
/// through the store's query capability, orders them chronologically, and
/// folds them from `initial_state`. An empty history folds to the initial
/// state; that is a sentinel, not an error. Projections hold no state
/// between calls.
#[async_trait]
pub trait Projection: Send + Sync {
    /// The state type this projection produces.
    type State: Send + Sync + Clone;

    /// The events this projection folds over.
    fn query(&self) -> EventQuery {
        EventQuery::new()
    }

    /// The state of an empty history.
    fn initial_state(&self) -> Self::State;

    /// Apply one event to the state.
    fn apply(&self, state: &mut Self::State, event: &SpaceEvent);

    /// Rebuild the state from a store.
    async fn rebuild(&self, store: &dyn EventStore) -> Result<Self::State> {
        let mut events = store.read(&self.query()).await?;
        // Stable sort: events with equal timestamps keep enumeration order,
        // and the last one applied wins.
        events.sort_by_key(SpaceEvent::timestamp);

        let mut state = self.initial_state();
        for event in &events {
            self.apply(&mut state, event);
        }
        Ok(state)
    }
}

/// Current name of the space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceNameState {
    /// The most recently set name; empty while none exists.
    pub space_name: String,
    /// Human-readable message while no name exists; empty otherwise.
    pub error_message: String,
}

impl SpaceNameState {
    fn not_created() -> Self {
        Self {
            space_name: String::new(),
            error_message: "No space has been created yet.".to_owned(),
        }
    }
}

/// Latest space name, derived from naming events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceNameProjection;

impl SpaceNameProjection {
    /// Create the projection.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Projection for SpaceNameProjection {
    type State = SpaceNameState;

    fn query(&self) -> EventQuery {
        EventQuery::new().with_kind(EventKind::SpaceNamed)
    }

    fn initial_state(&self) -> Self::State {
        SpaceNameState::not_created()
    }

    fn apply(&self, state: &mut Self::State, event: &SpaceEvent) {
        if let SpaceEvent::SpaceNamed { space_name, .. } = event {
            state.space_name.clone_from(space_name);
            state.error_message.clear();
        }
    }
}

/// Current date range of the space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRangeState {
    /// Start date as supplied by the caller; empty while none exists.
    pub start_date: String,
    /// End date as supplied by the caller; empty while none exists.
    pub end_date: String,
    /// Human-readable message while no range exists; empty otherwise.
    pub error_message: String,
}

impl DateRangeState {
    fn not_set() -> Self {
        Self {
            start_date: String::new(),
            end_date: String::new(),
            error_message: "Date range not set yet.".to_owned(),
        }
    }
}

/// Latest date range, derived from date range events.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRangeProjection;

impl DateRangeProjection {
    /// Create the projection.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Projection for DateRangeProjection {
    type State = DateRangeState;

    fn query(&self) -> EventQuery {
        EventQuery::new().with_kind(EventKind::DateRangeSet)
    }

    fn initial_state(&self) -> Self::State {
        DateRangeState::not_set()
    }

    fn apply(&self, state: &mut Self::State, event: &SpaceEvent) {
        if let SpaceEvent::DateRangeSet {
            start_date,
            end_date,
            ..
        } = event
        {
            state.start_date.clone_from(start_date);
            state.end_date.clone_from(end_date);
            state.error_message.clear();
        }
    }
}

/// A session derived from a topic submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Who submitted the topic.
    pub submitter: String,
    /// The category chosen on submission.
    pub category: String,
    /// The topic itself.
    pub topic: String,
    /// When the topic was submitted.
    pub submitted_at: DateTime<Utc>,
}

/// Every submitted topic, in submission order.
///
/// Unlike the latest-wins views, this is the full ordered history: every
/// submitted topic is a session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionsState {
    /// Sessions ascending by submission time.
    pub sessions: Vec<Session>,
}

impl SessionsState {
    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no topic has been submitted yet.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// All sessions, derived from topic submission events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionsProjection;

impl SessionsProjection {
    /// Create the projection.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Projection for SessionsProjection {
    type State = SessionsState;

    fn query(&self) -> EventQuery {
        EventQuery::new().with_kind(EventKind::TopicSubmitted)
    }

    fn initial_state(&self) -> Self::State {
        SessionsState::default()
    }

    fn apply(&self, state: &mut Self::State, event: &SpaceEvent) {
        if let SpaceEvent::TopicSubmitted {
            name,
            category,
            topic,
            timestamp,
            ..
        } = event
        {
            state.sessions.push(Session {
                submitter: name.clone(),
                category: category.clone(),
                topic: topic.clone(),
                submitted_at: *timestamp,
            });
        }
    }
}
