use thiserror::Error;

/// Errors produced by the tracker's fetch and store operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The geocoder returned no match for the city.
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// No observation with this id exists.
    #[error("Observation not found: {0}")]
    ObservationNotFound(i64),

    /// Operator input that could not be coerced (e.g. a non-integer id).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The remote API could not be reached.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote API answered with a non-success status.
    #[error("Upstream request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The remote API answered with a payload we could not understand.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl TrackerError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// True for both "city not found" and "observation not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CityNotFound(_) | Self::ObservationNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
