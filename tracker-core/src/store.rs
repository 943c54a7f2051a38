//! Observation storage.
//!
//! [`ObservationStore`] abstracts over the in-memory collection used by the
//! console menu and the SQLite table used by the HTTP service. Both follow the
//! same contract, including failing with
//! [`TrackerError::ObservationNotFound`](crate::TrackerError::ObservationNotFound)
//! when an update or delete matches nothing.

use crate::error::Result;
use crate::model::{NewObservation, Observation};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryObservationStore;
pub use sqlite::SqliteObservationStore;

pub trait ObservationStore: Send {
    /// Store a new observation, assigning it the next id. Notes start unset.
    fn insert(&mut self, new: NewObservation) -> Result<Observation>;

    /// All stored observations. Empty (not an error) when there are none.
    fn list(&self) -> Result<Vec<Observation>>;

    /// # Errors
    /// Returns `ObservationNotFound` if no observation has this id.
    fn get(&self, id: i64) -> Result<Observation>;

    /// Replace the notes of an observation; no other field changes.
    ///
    /// # Errors
    /// Returns `ObservationNotFound` if no observation has this id.
    fn update_notes(&mut self, id: i64, notes: &str) -> Result<Observation>;

    /// # Errors
    /// Returns `ObservationNotFound` if nothing was removed.
    fn delete(&mut self, id: i64) -> Result<()>;
}
