use crate::error::{Result, TrackerError};
use crate::model::{NewObservation, Observation};

use super::ObservationStore;

/// Process-local observation list with its own id counter.
#[derive(Debug)]
pub struct MemoryObservationStore {
    observations: Vec<Observation>,
    next_id: i64,
}

impl MemoryObservationStore {
    pub fn new() -> Self {
        Self { observations: Vec::new(), next_id: 1 }
    }

    fn position(&self, id: i64) -> Result<usize> {
        self.observations
            .iter()
            .position(|obs| obs.id == id)
            .ok_or(TrackerError::ObservationNotFound(id))
    }
}

impl Default for MemoryObservationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationStore for MemoryObservationStore {
    fn insert(&mut self, new: NewObservation) -> Result<Observation> {
        let obs = Observation::new(self.next_id, new);
        self.next_id += 1;
        self.observations.push(obs.clone());
        Ok(obs)
    }

    fn list(&self) -> Result<Vec<Observation>> {
        Ok(self.observations.clone())
    }

    fn get(&self, id: i64) -> Result<Observation> {
        let idx = self.position(id)?;
        Ok(self.observations[idx].clone())
    }

    fn update_notes(&mut self, id: i64, notes: &str) -> Result<Observation> {
        let idx = self.position(id)?;
        let obs = &mut self.observations[idx];
        obs.notes = Some(notes.to_string());
        Ok(obs.clone())
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let idx = self.position(id)?;
        self.observations.remove(idx);
        Ok(())
    }
}
