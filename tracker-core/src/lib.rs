//! Core library for the local weather tracker.
//!
//! This crate defines:
//! - The observation model and its error taxonomy
//! - Fetching current conditions from Open-Meteo
//! - Observation stores (in-memory and SQLite) and the tracker operations over them
//! - Configuration handling
//!
//! It is used by `tracker-cli` and `tracker-server`.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod store;
pub mod tracker;

pub use config::Config;
pub use error::{Result, TrackerError};
pub use model::{CurrentConditions, IngestRequest, NewObservation, NoteUpdate, Observation};
pub use provider::{WeatherProvider, provider_from_config};
pub use store::{MemoryObservationStore, ObservationStore, SqliteObservationStore};
pub use tracker::Tracker;
