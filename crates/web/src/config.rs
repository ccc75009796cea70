//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runtime configuration for the web front end.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub addr: SocketAddr,
    /// Directory holding the event records.
    pub store_dir: PathBuf,
}

impl ServerConfig {
    /// Read `OPENSPACE_ADDR` and `OPENSPACE_STORE_DIR`, falling back to
    /// `127.0.0.1:3000` and `./eventstore`.
    pub fn from_env() -> Result<Self> {
        let addr = match std::env::var("OPENSPACE_ADDR") {
            Ok(raw) => raw
                .parse()
                .context("OPENSPACE_ADDR is not a valid socket address")?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };
        let store_dir = std::env::var("OPENSPACE_STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("eventstore"));

        Ok(Self { addr, store_dir })
    }
}
