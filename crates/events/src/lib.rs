//! Event-sourced record keeping for an Open Space workflow.
//!
//! This crate is the core of a small collaborative planning tool: naming an
//! Open Space, setting its date range, and collecting topic submissions.
//! Key pieces:
//!
//! - **Event types**: immutable facts, one variant per thing that happened
//! - **Event store**: append-only storage with idempotent writes, keyed by
//!   a caller-supplied event id
//! - **Projections**: pure folds deriving current-state views from history
//!
//! # Example
//!
//! ```ignore
//! use openspace_events::{
//!     EventId, FileEventStore, Projection, SpaceEvent, SpaceNameProjection,
//! };
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> openspace_events::Result<()> {
//!     let store = FileEventStore::open("eventstore").await?;
//!
//!     // Appending the same id twice leaves exactly one record.
//!     let id = EventId::generate();
//!     store
//!         .append(SpaceEvent::space_named(id.clone(), "RustConf", Utc::now()))
//!         .await?;
//!
//!     let view = SpaceNameProjection::new().rebuild(&store).await?;
//!     println!("current space: {}", view.space_name);
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod error;
pub mod event;
pub mod file_store;
pub mod projection;
pub mod query;
pub mod store;
pub mod types;

// Re-export main types
pub use error::{Error, Result};
pub use event::SpaceEvent;
pub use file_store::FileEventStore;
pub use projection::{
    DateRangeProjection, DateRangeState, Projection, Session, SessionsProjection, SessionsState,
    SpaceNameProjection, SpaceNameState,
};
pub use query::EventQuery;
pub use store::{EventStore, InMemoryEventStore, TracingEventStore};
pub use types::{EventId, EventKind};
