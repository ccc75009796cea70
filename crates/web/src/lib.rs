//! HTTP front end for the Open Space record keeper.
//!
//! A thin wrapper over `openspace-events`: request handlers construct
//! events, submit them to the store for idempotent append, and render
//! state views. All state lives in the event store; handlers are
//! stateless between requests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::AppError;
pub use routes::router;
pub use state::AppState;
