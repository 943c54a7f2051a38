//! HTTP surface for the local weather tracker.
//!
//! Routes:
//! - `POST /ingest?city=&country=` records the current weather for a city
//! - `GET /observations` lists every observation
//! - `GET /observations/{id}` returns one observation
//! - `PUT /observations/{id}?notes=` replaces its note
//! - `DELETE /observations/{id}` removes it
//!
//! Not-found conditions answer 404 with `{"detail": ...}`; any other failure answers 500.

use std::{fs, sync::Arc};

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracker_core::{Config, SqliteObservationStore, Tracker, provider_from_config};

pub mod handlers;
pub mod routes;

pub use handlers::{Deleted, ErrorBody, NotesQuery};
pub use routes::routes;

/// Tracker shared by all request handlers; requests take turns on the store.
pub type SharedTracker = Arc<Mutex<Tracker<SqliteObservationStore>>>;

/// Open the configured database and wrap a tracker over it.
pub fn open_tracker(config: &Config) -> Result<SharedTracker> {
    let path = config.database_path()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
    }

    let store = SqliteObservationStore::open(&path)
        .with_context(|| format!("Failed to open database: {}", path.display()))?;

    Ok(Arc::new(Mutex::new(Tracker::new(store, provider_from_config(config)))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_tracker_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("data").join("observations.db");

        let mut config = Config::default();
        config.storage.database_path = Some(db.clone());

        let tracker = open_tracker(&config).unwrap();
        assert!(db.exists());
        assert!(tracker.lock().await.list().unwrap().is_empty());
    }
}
