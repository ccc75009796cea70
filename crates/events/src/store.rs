//! Event store trait and implementations.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::event::SpaceEvent;
use crate::query::EventQuery;
use crate::types::{EventId, EventKind};

/// Trait for event storage backends.
///
/// Stores are append-only: no operation rewrites or deletes a persisted
/// record. `append` is idempotent on the event id.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append an event unless its id is already present.
    ///
    /// Re-submitting an id that exists is a silent no-op returning the id.
    /// An event with an empty id is rejected with [`Error::InvalidEvent`].
    async fn append(&self, event: SpaceEvent) -> Result<EventId>;

    /// Read all events matching the query, in storage-enumeration order.
    ///
    /// A record that cannot be decoded aborts the read with
    /// [`Error::Decode`]; partial results are never returned.
    async fn read(&self, query: &EventQuery) -> Result<Vec<SpaceEvent>>;

    /// The most recently persisted event of the given kind.
    ///
    /// `None` means no such event exists. A record that exists but cannot
    /// be decoded is an error, not `None`.
    async fn last_of_kind(&self, kind: EventKind) -> Result<Option<SpaceEvent>> {
        let mut events = self.read(&EventQuery::new().with_kind(kind)).await?;
        events.sort_by_key(SpaceEvent::timestamp);
        Ok(events.pop())
    }

    /// The total number of persisted events.
    async fn count(&self) -> Result<usize>;
}

/// In-memory event store for tests and ephemeral use.
///
/// Enumeration order is insertion order.
#[derive(Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<SpaceEvent>>,
    ids: RwLock<HashSet<EventId>>,
}

impl InMemoryEventStore {
    /// Create a new in-memory event store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new in-memory event store wrapped in an Arc.
    pub fn new_arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, event: SpaceEvent) -> Result<EventId> {
        if event.id().as_str().is_empty() {
            return Err(Error::invalid_event("event id must not be empty"));
        }

        // Both locks are held across check and insert so a duplicate id
        // cannot slip in between them.
        let mut events = self.events.write().await;
        let mut ids = self.ids.write().await;

        let id = event.id().clone();
        if ids.contains(&id) {
            return Ok(id);
        }
        ids.insert(id.clone());
        events.push(event);
        Ok(id)
    }

    async fn read(&self, query: &EventQuery) -> Result<Vec<SpaceEvent>> {
        let events = self.events.read().await;
        Ok(query.filter_events(events.iter()).cloned().collect())
    }

    async fn count(&self) -> Result<usize> {
        let events = self.events.read().await;
        Ok(events.len())
    }
}

/// A wrapper that adds tracing to an event store.
pub struct TracingEventStore<S: EventStore> {
    inner: S,
}

impl<S: EventStore> TracingEventStore<S> {
    /// Create a new tracing event store.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: EventStore> EventStore for TracingEventStore<S> {
    async fn append(&self, event: SpaceEvent) -> Result<EventId> {
        tracing::debug!(
            kind = event.event_type(),
            id = %event.id(),
            "appending event"
        );
        let result = self.inner.append(event).await;
        if let Ok(ref id) = result {
            tracing::trace!(id = %id, "event appended");
        }
        result
    }

    async fn read(&self, query: &EventQuery) -> Result<Vec<SpaceEvent>> {
        tracing::debug!(?query, "reading events");
        self.inner.read(query).await
    }

    async fn last_of_kind(&self, kind: EventKind) -> Result<Option<SpaceEvent>> {
        tracing::debug!(kind = kind.as_str(), "reading last event of kind");
        self.inner.last_of_kind(kind).await
    }

    async fn count(&self) -> Result<usize> {
        self.inner.count().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    fn on_day(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn named(id: &str, name: &str, day: u32) -> SpaceEvent {
        SpaceEvent::space_named(EventId::new(id), name, on_day(day))
    }

    #[tokio::test]
    async fn test_append_and_read() {
        let store = InMemoryEventStore::new();
        store.append(named("a", "Test1", 1)).await.expect("append");

        let events = store.read(&EventQuery::new()).await.expect("read");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], named("a", "Test1", 1));
    }

    #[tokio::test]
    async fn test_duplicate_id_is_absorbed() {
        let store = InMemoryEventStore::new();
        store.append(named("a", "Test1", 1)).await.expect("append");
        store
            .append(named("a", "Test1 again", 2))
            .await
            .expect("duplicate append is not an error");

        assert_eq!(store.count().await.expect("count"), 1);
        let events = store.read(&EventQuery::new()).await.expect("read");
        assert_eq!(events[0], named("a", "Test1", 1));
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let store = InMemoryEventStore::new();
        let result = store.append(named("", "Test1", 1)).await;
        assert!(matches!(result, Err(Error::InvalidEvent { .. })));
    }

    #[tokio::test]
    async fn test_read_with_kind_filter() {
        let store = InMemoryEventStore::new();
        store.append(named("a", "Test1", 1)).await.expect("append");
        store
            .append(SpaceEvent::topic_submitted(
                EventId::new("b"),
                "Alice",
                "talk",
                "Lifetimes",
                on_day(2),
            ))
            .await
            .expect("append");

        let query = EventQuery::new().with_kind(EventKind::TopicSubmitted);
        let events = store.read(&query).await.expect("read");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "TopicSubmittedEvent");
    }

    #[tokio::test]
    async fn test_last_of_kind_none_when_empty() {
        let store = InMemoryEventStore::new();
        let last = store
            .last_of_kind(EventKind::SpaceNamed)
            .await
            .expect("read");
        assert!(last.is_none());
    }

    #[tokio::test]
    async fn test_last_of_kind_picks_latest_timestamp() {
        let store = InMemoryEventStore::new();
        // Insertion order deliberately differs from chronological order.
        store.append(named("b", "Test2", 2)).await.expect("append");
        store.append(named("a", "Test1", 1)).await.expect("append");
        store.append(named("c", "Test3", 3)).await.expect("append");

        let last = store
            .last_of_kind(EventKind::SpaceNamed)
            .await
            .expect("read")
            .expect("exists");
        assert_eq!(last, named("c", "Test3", 3));
    }

    #[tokio::test]
    async fn test_tracing_store_delegates() {
        let store = TracingEventStore::new(InMemoryEventStore::new());
        store.append(named("a", "Test1", 1)).await.expect("append");

        assert_eq!(store.count().await.expect("count"), 1);
        let events = store.read(&EventQuery::new()).await.expect("read");
        assert_eq!(events.len(), 1);
        let last = store
            .last_of_kind(EventKind::SpaceNamed)
            .await
            .expect("read");
        assert!(last.is_some());
    }
}
