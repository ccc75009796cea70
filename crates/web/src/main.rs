//! Binary entry point for the Open Space web front end.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Open the file-backed event store
//! 4. Serve the router

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use openspace_events::{FileEventStore, TracingEventStore};
use openspace_web::{routes, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!(store_dir = %config.store_dir.display(), "opening event store");

    let store = FileEventStore::open(&config.store_dir).await?;
    let state = AppState::new(Arc::new(TracingEventStore::new(store)))?;
    let app = routes::router(state);

    let listener = TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "openspace-web listening");
    axum::serve(listener, app).await?;

    Ok(())
}
