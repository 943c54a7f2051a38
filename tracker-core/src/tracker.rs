use crate::{
    error::Result,
    model::{IngestRequest, NewObservation, Observation},
    provider::WeatherProvider,
    store::ObservationStore,
};

/// Observation collection operations over a store and a weather provider.
#[derive(Debug)]
pub struct Tracker<S> {
    store: S,
    provider: Box<dyn WeatherProvider>,
}

impl<S: ObservationStore> Tracker<S> {
    pub fn new(store: S, provider: Box<dyn WeatherProvider>) -> Self {
        Self { store, provider }
    }

    /// Fetch the current weather for the city and record it.
    ///
    /// Nothing is stored when the fetch fails, including when the city is unknown.
    pub async fn add(&mut self, request: &IngestRequest) -> Result<Observation> {
        let conditions = self.provider.current_conditions(request).await?;
        self.store.insert(NewObservation::new(request, conditions))
    }

    pub fn list(&self) -> Result<Vec<Observation>> {
        self.store.list()
    }

    pub fn get(&self, id: i64) -> Result<Observation> {
        self.store.get(id)
    }

    pub fn update_note(&mut self, id: i64, notes: &str) -> Result<Observation> {
        self.store.update_notes(id, notes)
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.store.delete(id)
    }
}
