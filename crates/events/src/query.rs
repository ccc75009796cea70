//! Query filters over decoded events.

use chrono::{DateTime, Utc};

use crate::event::SpaceEvent;
use crate::types::EventKind;

/// Filter applied by the store's read path.
///
/// This is the retrieval capability projections are handed: a predicate over
/// decoded events, independent of the storage mechanism.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Restrict to a single event kind.
    pub kind: Option<EventKind>,
    /// Keep events strictly after this instant.
    pub after: Option<DateTime<Utc>>,
    /// Keep events strictly before this instant.
    pub before: Option<DateTime<Utc>>,
    /// Cap the number of results.
    pub limit: Option<usize>,
}

impl EventQuery {
    /// Create a new query matching every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a single event kind.
    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Keep events strictly after this instant.
    pub fn after(mut self, timestamp: DateTime<Utc>) -> Self {
        self.after = Some(timestamp);
        self
    }

    /// Keep events strictly before this instant.
    pub fn before(mut self, timestamp: DateTime<Utc>) -> Self {
        self.before = Some(timestamp);
        self
    }

    /// Cap the number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a single event passes every configured filter.
    pub fn matches(&self, event: &SpaceEvent) -> bool {
        if let Some(kind) = self.kind {
            if event.kind() != kind {
                return false;
            }
        }
        if let Some(after) = self.after {
            if event.timestamp() <= after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if event.timestamp() >= before {
                return false;
            }
        }
        true
    }

    /// Apply the filters to an event iterator.
    pub fn filter_events<'a>(
        &'a self,
        events: impl Iterator<Item = &'a SpaceEvent> + 'a,
    ) -> impl Iterator<Item = &'a SpaceEvent> + 'a {
        events
            .filter(move |event| self.matches(event))
            .take(self.limit.unwrap_or(usize::MAX))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::types::EventId;

    fn on_day(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn sample_events() -> Vec<SpaceEvent> {
        vec![
            SpaceEvent::space_named(EventId::new("a"), "Test1", on_day(1)),
            SpaceEvent::date_range_set(EventId::new("b"), "2024-06-01", "2024-06-02", on_day(2)),
            SpaceEvent::topic_submitted(EventId::new("c"), "Alice", "talk", "Traits", on_day(3)),
        ]
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let events = sample_events();
        let query = EventQuery::new();
        assert_eq!(query.filter_events(events.iter()).count(), 3);
    }

    #[test]
    fn test_kind_filter() {
        let events = sample_events();
        let query = EventQuery::new().with_kind(EventKind::SpaceNamed);

        let filtered: Vec<_> = query.filter_events(events.iter()).collect();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].event_type(), "OpenSpaceNamedEvent");
    }

    #[test]
    fn test_after_excludes_exact_timestamp() {
        let events = sample_events();
        let query = EventQuery::new().after(on_day(1));

        let filtered: Vec<_> = query.filter_events(events.iter()).collect();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_before_excludes_exact_timestamp() {
        let events = sample_events();
        let query = EventQuery::new().before(on_day(3));

        let filtered: Vec<_> = query.filter_events(events.iter()).collect();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_limit() {
        let events = sample_events();
        let query = EventQuery::new().limit(2);
        assert_eq!(query.filter_events(events.iter()).count(), 2);
    }

    #[test]
    fn test_builder_chaining() {
        let query = EventQuery::new()
            .with_kind(EventKind::TopicSubmitted)
            .after(on_day(1))
            .limit(10);

        assert_eq!(query.kind, Some(EventKind::TopicSubmitted));
        assert_eq!(query.after, Some(on_day(1)));
        assert_eq!(query.limit, Some(10));
    }
}
