//! File-backed event store: one JSON record per event.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::event::SpaceEvent;
use crate::query::EventQuery;
use crate::store::EventStore;
use crate::types::{EventId, EventKind};

const KINDS: [EventKind; 3] = [
    EventKind::SpaceNamed,
    EventKind::DateRangeSet,
    EventKind::TopicSubmitted,
];

/// Extract the event id embedded in a record name.
///
/// Record names are `<19-char timestamp>-<id>-<kind>.json`; matching the
/// kind suffix from the closed set recovers the id exactly, so an id that
/// happens to look like a timestamp fragment cannot collide.
fn record_id(name: &str) -> Option<&str> {
    let rest = name.get(20..)?.strip_suffix(".json")?;
    KINDS.iter().find_map(|kind| {
        rest.strip_suffix(kind.as_str())
            .and_then(|id| id.strip_suffix('-'))
    })
}

/// Append-only store keeping each event in its own JSON file.
///
/// Record names follow `<timestamp>-<id>-<kind>.json` with colons replaced
/// by dashes and sub-second precision stripped, so lexicographic name order
/// equals chronological order at second granularity. Records are never
/// rewritten or deleted; the directory is the single source of truth.
pub struct FileEventStore {
    root: PathBuf,
    append_gate: Mutex<()>,
}

impl FileEventStore {
    /// Open a store rooted at the given directory, creating it if absent.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|source| Error::io(&root, source))?;
        Ok(Self {
            root,
            append_gate: Mutex::new(()),
        })
    }

    /// The directory holding the records.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_name(event: &SpaceEvent) -> String {
        format!(
            "{}-{}-{}.json",
            event.timestamp().format("%Y-%m-%dT%H-%M-%S"),
            event.id(),
            event.event_type(),
        )
    }

    async fn record_names(&self) -> Result<Vec<String>> {
        let mut dir = fs::read_dir(&self.root)
            .await
            .map_err(|source| Error::io(&self.root, source))?;

        let mut names = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|source| Error::io(&self.root, source))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") {
                names.push(name);
            }
        }
        // Deterministic enumeration; for these names lexicographic order is
        // chronological order.
        names.sort();
        Ok(names)
    }

    async fn decode_record(&self, name: &str) -> Result<SpaceEvent> {
        let path = self.root.join(name);
        let bytes = fs::read(&path)
            .await
            .map_err(|source| Error::io(&path, source))?;
        serde_json::from_slice(&bytes).map_err(|source| Error::decode(&path, source))
    }
}

#[async_trait]
impl EventStore for FileEventStore {
    async fn append(&self, event: SpaceEvent) -> Result<EventId> {
        if event.id().as_str().is_empty() {
            return Err(Error::invalid_event("event id must not be empty"));
        }

        // The existence check and the write must not interleave with another
        // append of the same id.
        let _gate = self.append_gate.lock().await;

        if self
            .record_names()
            .await?
            .iter()
            .any(|name| record_id(name) == Some(event.id().as_str()))
        {
            tracing::debug!(id = %event.id(), "duplicate append ignored");
            return Ok(event.id().clone());
        }

        let path = self.root.join(Self::record_name(&event));
        let json = serde_json::to_vec(&event).map_err(Error::Encode)?;

        // create_new: an existing record can never be overwritten.
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|source| Error::io(&path, source))?;
        file.write_all(&json)
            .await
            .map_err(|source| Error::io(&path, source))?;
        file.flush()
            .await
            .map_err(|source| Error::io(&path, source))?;

        tracing::debug!(id = %event.id(), kind = event.event_type(), "event persisted");
        Ok(event.id().clone())
    }

    async fn read(&self, query: &EventQuery) -> Result<Vec<SpaceEvent>> {
        let mut events = Vec::new();
        for name in self.record_names().await? {
            events.push(self.decode_record(&name).await?);
        }
        Ok(query.filter_events(events.iter()).cloned().collect())
    }

    async fn last_of_kind(&self, kind: EventKind) -> Result<Option<SpaceEvent>> {
        // Record names embed the kind, so the lexicographically last
        // matching name is the most recent record of that kind. Decode
        // failures propagate; corruption is not "not found".
        let suffix = format!("-{}.json", kind.as_str());
        let last = self
            .record_names()
            .await?
            .into_iter()
            .filter(|name| name.ends_with(&suffix))
            .next_back();

        match last {
            Some(name) => Ok(Some(self.decode_record(&name).await?)),
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.record_names().await?.len())
    }
}
